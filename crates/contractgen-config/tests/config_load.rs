// crates/contractgen-config/tests/config_load.rs
// ============================================================================
// Module: Config Load Tests
// Description: Load contractgen.toml files from disk and text.
// Purpose: Ensure defaults, limits, and validation fail closed.
// Dependencies: contractgen-config, tempfile
// ============================================================================

//! ## Overview
//! Loads configuration through the public API and checks defaults, the
//! canonical example, and rejection of invalid files.

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
    reason = "Test-only config validation uses panic-based assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;

use contractgen_config::ConfigError;
use contractgen_config::GeneratorConfig;
use contractgen_config::MAX_CONFIG_FILE_SIZE;
use contractgen_config::ThresholdObjectives;
use contractgen_config::config_toml_example;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn empty_file_yields_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let config = GeneratorConfig::from_toml_str("")?;
    assert_eq!(config, GeneratorConfig::default());
    assert_eq!(config.output.dir, PathBuf::from("generated"));
    assert_eq!(config.validation.max_name_length, 255);
    assert_eq!(config.validation.max_description_length, 1050);
    assert_eq!(config.validation.allowed_url_schemes, vec!["http", "https"]);
    assert!(!config.validation.fail_on_findings);
    assert_eq!(config.openapi.default_version, "1.0");
    assert!(config.openapi.run_validator);
    assert_eq!(config.openslo.threshold_objectives, ThresholdObjectives::Placeholder);
    assert_eq!(config.logging.level, "info");
    Ok(())
}

#[test]
fn example_config_round_trips_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let config = GeneratorConfig::from_toml_str(&config_toml_example())?;
    assert_eq!(config, GeneratorConfig::default());
    Ok(())
}

#[test]
fn load_reads_explicit_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("contractgen.toml");
    fs::write(
        &path,
        "[output]\nbase_name = \"shop\"\n\n[openslo]\nthreshold_objectives = \"full\"\n",
    )?;
    let config = GeneratorConfig::load(Some(&path))?;
    assert_eq!(config.output.base_name.as_deref(), Some("shop"));
    assert_eq!(config.openslo.threshold_objectives, ThresholdObjectives::Full);
    Ok(())
}

#[test]
fn missing_explicit_path_is_io_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let Err(err) = GeneratorConfig::load(Some(&dir.path().join("absent.toml"))) else {
        return Err("expected io error".into());
    };
    assert!(matches!(err, ConfigError::Io(_)));
    Ok(())
}

#[test]
fn oversized_file_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("big.toml");
    let padding = format!("# {}\n", "x".repeat(MAX_CONFIG_FILE_SIZE));
    fs::write(&path, padding)?;
    let Err(err) = GeneratorConfig::load(Some(&path)) else {
        return Err("expected size error".into());
    };
    assert!(err.to_string().contains("size limit"));
    Ok(())
}

#[test]
fn non_utf8_file_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, [0xff_u8, 0xfe, 0x00])?;
    let Err(err) = GeneratorConfig::load(Some(&path)) else {
        return Err("expected utf-8 error".into());
    };
    assert!(matches!(err, ConfigError::Invalid(message) if message.contains("utf-8")));
    Ok(())
}

#[test]
fn invalid_values_fail_validation() {
    let cases = [
        "[validation]\nmax_name_length = 0\n",
        "[validation]\nmax_description_length = 0\n",
        "[validation]\nallowed_url_schemes = []\n",
        "[validation]\nallowed_url_schemes = [\"1http\"]\n",
        "[logging]\nlevel = \"verbose\"\n",
        "[openapi]\ndefault_version = \" \"\n",
        "[output]\nbase_name = \"../escape\"\n",
    ];
    for case in cases {
        let result = GeneratorConfig::from_toml_str(case);
        assert!(matches!(result, Err(ConfigError::Invalid(_))), "accepted {case}");
    }
}

#[test]
fn unknown_keys_are_parse_errors() {
    let result = GeneratorConfig::from_toml_str("[output]\ndirectory = \"x\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
    let result = GeneratorConfig::from_toml_str("[openslo]\nthreshold_objectives = \"some\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
