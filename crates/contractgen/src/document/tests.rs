// crates/contractgen/src/document/tests.rs
// ============================================================================
// Module: Document Model Unit Tests
// Description: Key ordering, optional insertion, and bundle joining.
// Purpose: Ensure serialized output is deterministic.
// Dependencies: contractgen, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! Checks insertion-ordered serialization and the separator placement rule.

#![allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions favor direct unwraps for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::Document;
use super::DocumentBundle;
use super::insert_optional;
use super::metadata;
use super::to_yaml;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn keys_serialize_in_insertion_order() {
    let mut document = Document::new();
    document.insert("zeta".to_string(), json!(1));
    document.insert("alpha".to_string(), json!(2));
    let text = to_yaml(&Value::Object(document)).unwrap();
    assert_eq!(text, "zeta: 1\nalpha: 2\n");
}

#[test]
fn optional_values_are_omitted_when_absent() {
    let mut document = Document::new();
    insert_optional(&mut document, "present", Some("x"));
    insert_optional::<&str>(&mut document, "absent", None);
    assert!(document.contains_key("present"));
    assert!(!document.contains_key("absent"));
    assert_eq!(metadata("svc", None), json!({ "name": "svc" }));
    assert_eq!(metadata("svc", Some("Svc")), json!({ "name": "svc", "displayName": "Svc" }));
}

#[test]
fn bundle_separator_precedes_every_document() {
    let mut bundle = DocumentBundle::new();
    assert!(bundle.is_empty());
    bundle.push(json!({ "kind": "SLO" }));
    bundle.push(json!({ "kind": "Service" }));
    assert_eq!(bundle.len(), 2);
    assert_eq!(bundle.render().unwrap(), "---\nkind: SLO\n---\nkind: Service\n");
}
