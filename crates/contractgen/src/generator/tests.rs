// crates/contractgen/src/generator/tests.rs
// ============================================================================
// Module: Generation Run Unit Tests
// Description: Artifact naming, run ownership, and findings policy.
// Purpose: Ensure runs are deterministic and reject unsafe output.
// Dependencies: contractgen, contractgen-config, contractgen-core, serde_json
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers favor direct unwraps."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use contractgen_config::GeneratorConfig;
use contractgen_core::ServiceSpecification;
use serde_json::json;

use super::Generator;
use super::belongs_to_run;
use super::check_artifact_names;
use super::check_file_name;
use crate::GenerationError;
use crate::input::parse_yaml;
use crate::types::GeneratedArtifact;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn spec_with_bad_url() -> ServiceSpecification {
    serde_json::from_value(json!({
        "name": "Shop",
        "endpoints": [{ "name": "Orders", "operations": [{ "name": "ping" }] }],
        "data_sources": [{ "name": "metrics", "source_type": "Prometheus", "url": "ftp://metrics" }]
    }))
    .unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn artifact_names_must_be_plain_file_names() {
    assert!(check_file_name("shop.yaml").is_ok());
    assert!(check_file_name("shop-openslo-availability.yaml").is_ok());
    assert!(check_file_name("").is_err());
    assert!(check_file_name("..").is_err());
    assert!(check_file_name("nested/shop.yaml").is_err());
    assert!(check_file_name("..\\shop.yaml").is_err());
}

#[test]
fn duplicate_artifacts_are_rejected() {
    let artifacts = vec![
        GeneratedArtifact::yaml("shop.yaml", String::from("a")),
        GeneratedArtifact::yaml("shop.yaml", String::from("b")),
    ];
    let err = check_artifact_names(&artifacts).unwrap_err();
    assert_eq!(err, GenerationError::Generation(String::from("duplicate artifact: shop.yaml")));
}

#[test]
fn run_ownership_follows_naming_rules() {
    assert!(belongs_to_run("shop", "shop.yaml"));
    assert!(belongs_to_run("shop", "shop-sla.yaml"));
    assert!(belongs_to_run("shop", "shop-openslo-latency.yaml"));
    assert!(!belongs_to_run("shop", "shop-openslo-latency.yml"));
    assert!(!belongs_to_run("shop", "orders.yaml"));
    assert!(!belongs_to_run("shop", "notes.txt"));
}

#[test]
fn template_names_with_separators_are_rejected() {
    let mut spec = parse_yaml(include_str!("../../tests/fixtures/shop.yaml")).unwrap();
    spec.slo_templates[0].name = String::from("../escape");
    let err = Generator::default().build(&spec, "shop").unwrap_err();
    assert_eq!(
        err,
        GenerationError::OutputPath(PathBuf::from("shop-openslo-../escape.yaml"))
    );
}

#[test]
fn findings_are_reported_but_not_fatal_by_default() {
    let bundle = Generator::default().build(&spec_with_bad_url(), "shop").unwrap();
    assert_eq!(bundle.findings.len(), 1);
    assert!(!bundle.is_clean());
    assert!(bundle.text("shop.yaml").is_some());
}

#[test]
fn findings_are_fatal_when_configured() {
    let mut config = GeneratorConfig::default();
    config.validation.fail_on_findings = true;
    let err = Generator::new(config).build(&spec_with_bad_url(), "shop").unwrap_err();
    assert!(matches!(err, GenerationError::FindingsRejected(_)));
}

#[test]
fn contract_only_run_has_one_artifact() {
    let spec: ServiceSpecification = serde_json::from_value(json!({ "name": "Shop" })).unwrap();
    let bundle = Generator::default().build(&spec, "shop").unwrap();
    let paths: Vec<&str> = bundle.artifacts.iter().map(|artifact| artifact.path.as_str()).collect();
    assert_eq!(paths, vec!["shop.yaml"]);
    assert!(bundle.validator_messages.is_empty());
}
