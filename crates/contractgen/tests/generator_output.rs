// crates/contractgen/tests/generator_output.rs
// ============================================================================
// Module: Generated Output Tests
// Description: Writes and verifies generated artifacts on disk.
// Purpose: Ensure output is idempotent and drift is detected.
// Dependencies: contractgen, tempfile
// ============================================================================

//! ## Overview
//! Writes the shared fixture's artifacts into a temporary directory, then
//! checks that verification catches edits, removals, and leftover bundles
//! while ignoring unrelated files.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output checks use panic-based assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use contractgen::Generator;
use contractgen::input::parse_yaml;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const SHOP_YAML: &str = include_str!("fixtures/shop.yaml");

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn written_output_verifies() -> Result<(), Box<dyn std::error::Error>> {
    let spec = parse_yaml(SHOP_YAML)?;
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("generated");
    let generator = Generator::default();
    let bundle = generator.write_to(&spec, "shop", &out)?;

    let mut written: Vec<String> = fs::read_dir(&out)?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    written.sort();
    assert_eq!(
        written,
        vec!["shop-openslo-availability.yaml", "shop-sla.yaml", "shop.yaml"]
    );
    for artifact in &bundle.artifacts {
        assert_eq!(fs::read(out.join(&artifact.path))?, artifact.bytes);
    }
    generator.verify_output(&spec, "shop", &out)?;
    Ok(())
}

#[test]
fn repeated_runs_are_byte_identical() -> Result<(), Box<dyn std::error::Error>> {
    let spec = parse_yaml(SHOP_YAML)?;
    let dir = tempfile::tempdir()?;
    let generator = Generator::default();
    let first = generator.write_to(&spec, "shop", dir.path())?;
    let second = generator.write_to(&spec, "shop", dir.path())?;
    assert_eq!(first, second);
    generator.verify_output(&spec, "shop", dir.path())?;
    Ok(())
}

#[test]
fn verification_detects_drift() -> Result<(), Box<dyn std::error::Error>> {
    let spec = parse_yaml(SHOP_YAML)?;
    let dir = tempfile::tempdir()?;
    let generator = Generator::default();
    generator.write_to(&spec, "shop", dir.path())?;

    fs::write(dir.path().join("shop-sla.yaml"), "sla-doc-version: '0.0'\n")?;
    let Err(err) = generator.verify_output(&spec, "shop", dir.path()) else {
        return Err("expected mismatch".into());
    };
    assert!(err.to_string().contains("shop-sla.yaml"));

    generator.write_to(&spec, "shop", dir.path())?;
    fs::write(dir.path().join("notes.txt"), "unrelated\n")?;
    generator.verify_output(&spec, "shop", dir.path())?;

    fs::write(dir.path().join("shop-openslo-latency.yaml"), "---\nkind: SLO\n")?;
    let Err(err) = generator.verify_output(&spec, "shop", dir.path()) else {
        return Err("expected unexpected artifact".into());
    };
    assert!(err.to_string().contains("unexpected artifact: shop-openslo-latency.yaml"));

    fs::remove_file(dir.path().join("shop-openslo-latency.yaml"))?;
    fs::remove_file(dir.path().join("shop.yaml"))?;
    let Err(err) = generator.verify_output(&spec, "shop", dir.path()) else {
        return Err("expected missing artifact".into());
    };
    assert!(err.to_string().contains("missing artifact: shop.yaml"));
    Ok(())
}

#[test]
fn missing_output_directory_fails_verification() -> Result<(), Box<dyn std::error::Error>> {
    let spec = parse_yaml(SHOP_YAML)?;
    let dir = tempfile::tempdir()?;
    let result = Generator::default().verify_output(&spec, "shop", &dir.path().join("absent"));
    assert!(result.is_err());
    Ok(())
}

#[test]
fn fixture_run_is_clean() -> Result<(), Box<dyn std::error::Error>> {
    let spec = parse_yaml(SHOP_YAML)?;
    let bundle = Generator::default().build(&spec, "shop")?;
    let findings: Vec<String> = bundle.findings.iter().map(ToString::to_string).collect();
    assert!(bundle.is_clean(), "findings: {}", findings.join("; "));
    Ok(())
}
