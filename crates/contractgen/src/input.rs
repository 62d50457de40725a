// crates/contractgen/src/input.rs
// ============================================================================
// Module: Specification Input
// Description: Loads serialized service specifications from disk.
// Purpose: Decode JSON or YAML input and derive the output base name.
// Dependencies: contractgen-core, contractgen-config, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! Files ending in `.json` are decoded as JSON; anything else is decoded as
//! YAML. YAML is first read into a JSON value so both formats share one
//! decoding path for the externally tagged AST enums.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use contractgen_config::OutputConfig;
use contractgen_core::ServiceSpecification;
use serde_json::Value;
use tracing::debug;

use crate::GenerationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted input size in bytes.
pub const MAX_SPECIFICATION_SIZE: usize = 16 * 1024 * 1024;
/// Base name used when the input path has no usable file stem.
const FALLBACK_BASE_NAME: &str = "contract";

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Reads and decodes a specification file.
///
/// # Errors
///
/// Returns [`GenerationError::Io`] when the file cannot be read and
/// [`GenerationError::Input`] when it is too large, not UTF-8, or malformed.
pub fn load_specification(path: &Path) -> Result<ServiceSpecification, GenerationError> {
    let bytes = fs::read(path)
        .map_err(|err| GenerationError::Io(format!("read {}: {err}", path.display())))?;
    if bytes.len() > MAX_SPECIFICATION_SIZE {
        return Err(GenerationError::Input(format!(
            "{} exceeds {MAX_SPECIFICATION_SIZE} bytes",
            path.display()
        )));
    }
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| GenerationError::Input(format!("{} must be utf-8", path.display())))?;
    let is_json = path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let spec = if is_json { parse_json(text) } else { parse_yaml(text) }?;
    debug!(
        path = %path.display(),
        endpoints = spec.endpoints.len(),
        slo_templates = spec.slo_templates.len(),
        "loaded specification"
    );
    Ok(spec)
}

/// Decodes a JSON specification.
///
/// # Errors
///
/// Returns [`GenerationError::Input`] when the text is malformed.
pub fn parse_json(text: &str) -> Result<ServiceSpecification, GenerationError> {
    serde_json::from_str(text).map_err(|err| GenerationError::Input(err.to_string()))
}

/// Decodes a YAML specification.
///
/// # Errors
///
/// Returns [`GenerationError::Input`] when the text is malformed.
pub fn parse_yaml(text: &str) -> Result<ServiceSpecification, GenerationError> {
    let value: Value =
        serde_yaml::from_str(text).map_err(|err| GenerationError::Input(err.to_string()))?;
    serde_json::from_value(value).map_err(|err| GenerationError::Input(err.to_string()))
}

// ============================================================================
// SECTION: Naming
// ============================================================================

/// Returns the output base name for an input path.
///
/// The configured base name wins, with surrounding whitespace trimmed;
/// otherwise the file name with its last extension trimmed is used.
#[must_use]
pub fn base_name_for(path: &Path, output: &OutputConfig) -> String {
    let configured = output.base_name.as_deref().map(str::trim).filter(|name| !name.is_empty());
    if let Some(base_name) = configured {
        return base_name.to_string();
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| FALLBACK_BASE_NAME.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests;
