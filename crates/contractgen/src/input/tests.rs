// crates/contractgen/src/input/tests.rs
// ============================================================================
// Module: Specification Input Unit Tests
// Description: Format dispatch, size limits, and base name derivation.
// Purpose: Ensure both formats decode identically and names are stable.
// Dependencies: contractgen, contractgen-config, tempfile
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions favor direct unwraps."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use contractgen_config::OutputConfig;

use super::base_name_for;
use super::load_specification;
use super::parse_json;
use super::parse_yaml;
use crate::GenerationError;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn yaml_and_json_decode_to_the_same_specification() {
    let yaml = "\
name: Shop
endpoints:
- name: Orders
  operations:
  - name: ping
    http_method: get
";
    let json = r#"{"name":"Shop","endpoints":[{"name":"Orders","operations":[{"name":"ping","http_method":"get"}]}]}"#;
    assert_eq!(parse_yaml(yaml).unwrap(), parse_json(json).unwrap());
}

#[test]
fn load_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("shop.json");
    fs::write(&json_path, r#"{"name":"Shop"}"#).unwrap();
    assert_eq!(load_specification(&json_path).unwrap().name, "Shop");

    let yaml_path = dir.path().join("shop.mdsl.yaml");
    fs::write(&yaml_path, "name: Shop\n").unwrap();
    assert_eq!(load_specification(&yaml_path).unwrap().name, "Shop");
}

#[test]
fn malformed_input_is_an_input_error() {
    let err = parse_yaml("name: [unclosed").unwrap_err();
    assert!(matches!(err, GenerationError::Input(_)));
    let err = parse_json("{}").unwrap_err();
    assert!(matches!(err, GenerationError::Input(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_specification(Path::new("does/not/exist.yaml")).unwrap_err();
    assert!(matches!(err, GenerationError::Io(_)));
}

#[test]
fn base_name_trims_last_extension() {
    let output = OutputConfig::default();
    assert_eq!(base_name_for(Path::new("specs/shop.yaml"), &output), "shop");
    assert_eq!(base_name_for(Path::new("specs/shop.mdsl.yaml"), &output), "shop.mdsl");

    let configured = OutputConfig {
        base_name: Some(String::from("orders")),
        ..OutputConfig::default()
    };
    assert_eq!(base_name_for(Path::new("specs/shop.yaml"), &configured), "orders");
}

#[test]
fn configured_base_name_is_trimmed() {
    let configured = OutputConfig {
        base_name: Some(String::from(" shop ")),
        ..OutputConfig::default()
    };
    assert_eq!(base_name_for(Path::new("specs/orders.yaml"), &configured), "shop");
}
