// crates/contractgen/src/document.rs
// ============================================================================
// Module: Document Model
// Description: Ordered key-value documents and multi-document bundles.
// Purpose: Give renderers one serialization path with stable key order.
// Dependencies: serde_json (preserve_order), serde_yaml
// ============================================================================

//! ## Overview
//! Renderers build [`Document`] maps; with `preserve_order` enabled the keys
//! serialize in insertion order. A [`DocumentBundle`] is an ordered sequence
//! of independent documents that share one physical file: each document is
//! preceded by [`DOCUMENT_SEPARATOR`], including the first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::GenerationError;

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Ordered key-value document.
pub type Document = Map<String, Value>;

/// Marker placed before every document of a bundle.
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Inserts `value` under `key` only when it is present.
pub fn insert_optional<T: Into<Value>>(document: &mut Document, key: &str, value: Option<T>) {
    if let Some(value) = value {
        document.insert(key.to_string(), value.into());
    }
}

/// Builds a `metadata` map with a name and an optional display name.
#[must_use]
pub fn metadata(name: &str, display_name: Option<&str>) -> Value {
    let mut document = Document::new();
    document.insert("name".to_string(), Value::from(name));
    insert_optional(&mut document, "displayName", display_name);
    Value::Object(document)
}

/// Serializes one document to YAML text.
///
/// # Errors
///
/// Returns [`GenerationError::Serialization`] when serialization fails.
pub fn to_yaml(value: &Value) -> Result<String, GenerationError> {
    serde_yaml::to_string(value).map_err(|err| GenerationError::Serialization(err.to_string()))
}

// ============================================================================
// SECTION: Bundles
// ============================================================================

/// Ordered sequence of documents written to one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentBundle {
    /// Documents in output order.
    documents: Vec<Value>,
}

impl DocumentBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document.
    pub fn push(&mut self, document: Value) {
        self.documents.push(document);
    }

    /// Returns the documents in output order.
    #[must_use]
    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    /// Returns the number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true when the bundle holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Renders every document, each preceded by the separator.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Serialization`] when a document fails to
    /// serialize.
    pub fn render(&self) -> Result<String, GenerationError> {
        let mut text = String::new();
        for document in &self.documents {
            text.push_str(DOCUMENT_SEPARATOR);
            text.push_str(&to_yaml(document)?);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests;
