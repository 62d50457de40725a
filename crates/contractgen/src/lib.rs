// crates/contractgen/src/lib.rs
// ============================================================================
// Module: contractgen Library
// Description: Contract document renderers and generation runs.
// Purpose: Turn a service specification into consistent output documents.
// Dependencies: contractgen-core, contractgen-config, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! One generation run fans a single service specification out into a primary
//! API contract document, an optional SLA extension document, and one SLO
//! bundle per SLO template. The documents refer to each other by file name
//! and every name is derived from the input base name, so repeated runs over
//! the same input produce the same files.
//!
//! Advisory findings never abort a run unless the configuration asks for it.
//! Unresolvable references always do.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod document;
pub mod generator;
pub mod input;
pub mod openapi;
pub mod openslo;
pub mod schemas;
pub mod sla;
pub mod types;
pub mod validation;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use contractgen_core::ModelError;
use thiserror::Error;

/// Errors raised by a generation run.
///
/// # Invariants
/// - Variants carry human-readable context for diagnostics.
/// - [`GenerationError::OutputPath`] always includes the offending path.
#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    /// IO failure while reading input or writing artifacts.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization failure while rendering documents.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The input specification could not be decoded.
    #[error("input error: {0}")]
    Input(String),
    /// Model construction failed.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// An OpenSLO declaration referenced by name does not exist.
    #[error("unresolved {kind} reference: {name}")]
    UnresolvedReference {
        /// Declaration kind, such as `service` or `indicator`.
        kind: &'static str,
        /// Referenced name.
        name: String,
    },
    /// Two operations map to the same path and HTTP method.
    #[error("duplicate operation: {method} {path}")]
    DuplicateOperation {
        /// Lower-case HTTP method.
        method: String,
        /// Operation path.
        path: String,
    },
    /// A renderer was asked to render an empty template list.
    #[error("no {0} templates defined")]
    MissingTemplates(&'static str),
    /// Findings exist and the configuration rejects them.
    #[error("generation rejected: {0}")]
    FindingsRejected(String),
    /// Generation or verification failed.
    #[error("contract generation error: {0}")]
    Generation(String),
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {0}")]
    OutputPath(PathBuf),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use generator::Generator;
pub use types::GeneratedArtifact;
pub use types::GenerationBundle;
pub use validation::Finding;
pub use validation::FindingCode;
