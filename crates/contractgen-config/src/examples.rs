// crates/contractgen-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for `contractgen.toml`. Every key is listed with its
//! default value so the example doubles as reference documentation.

/// Returns a canonical example `contractgen.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[output]
dir = "generated"
# base_name = "shop"

[validation]
max_name_length = 255
max_description_length = 1050
allowed_url_schemes = ["http", "https"]
fail_on_findings = false

[openapi]
default_version = "1.0"
run_validator = true

[openslo]
threshold_objectives = "placeholder"

[logging]
level = "info"
"#,
    )
}
