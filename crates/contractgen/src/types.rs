// crates/contractgen/src/types.rs
// ============================================================================
// Module: Generation Types
// Description: Shared shapes for generated artifacts and run results.
// Purpose: Carry rendered bytes, findings, and validator output together.
// Dependencies: crate::validation
// ============================================================================

//! ## Overview
//! A [`GenerationBundle`] is everything one run produced. Artifacts are plain
//! bytes with a relative path; the bundle never touches the file system.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::validation::Finding;

// ============================================================================
// SECTION: Artifacts
// ============================================================================

/// Content type of every generated document.
pub const YAML_CONTENT_TYPE: &str = "application/yaml";

/// Generated artifact with content and metadata.
///
/// # Invariants
/// - When produced by [`crate::Generator`], `path` is relative and contains
///   no parent or root components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Relative path under the output directory.
    pub path: String,
    /// Content type of the payload.
    pub content_type: String,
    /// Serialized artifact bytes.
    pub bytes: Vec<u8>,
}

impl GeneratedArtifact {
    /// Creates a YAML artifact from rendered text.
    #[must_use]
    pub fn yaml(path: impl Into<String>, text: String) -> Self {
        Self {
            path: path.into(),
            content_type: YAML_CONTENT_TYPE.to_string(),
            bytes: text.into_bytes(),
        }
    }
}

// ============================================================================
// SECTION: Bundle
// ============================================================================

/// Result of one generation run.
///
/// # Invariants
/// - When produced by [`crate::Generator`], `artifacts` are ordered by path
///   and paths are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationBundle {
    /// Generated documents, ordered by path.
    pub artifacts: Vec<GeneratedArtifact>,
    /// Advisory findings over the input specification.
    pub findings: Vec<Finding>,
    /// Structural validator messages for the primary document.
    pub validator_messages: Vec<String>,
}

impl GenerationBundle {
    /// Returns the artifact stored under `path`.
    #[must_use]
    pub fn artifact(&self, path: &str) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|artifact| artifact.path == path)
    }

    /// Returns the artifact at `path` as UTF-8 text.
    #[must_use]
    pub fn text(&self, path: &str) -> Option<&str> {
        self.artifact(path).and_then(|artifact| std::str::from_utf8(&artifact.bytes).ok())
    }

    /// Returns true when the run produced no findings and no validator
    /// messages.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.validator_messages.is_empty()
    }
}
