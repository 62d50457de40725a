// crates/contractgen-config/src/config.rs
// ============================================================================
// Module: contractgen Configuration
// Description: Configuration loading and validation for contract generation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, thiserror
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path resolves from an explicit argument, then the `CONTRACTGEN_CONFIG`
//! environment variable, then `contractgen.toml` in the working directory.
//! When none of these exist the defaults apply; a path that was named
//! explicitly must exist.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "contractgen.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CONTRACTGEN_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Log levels accepted by `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Complete generator configuration.
///
/// # Invariants
/// - Values returned by [`GeneratorConfig::load`] have passed
///   [`GeneratorConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Output location and naming.
    #[serde(default)]
    pub output: OutputConfig,
    /// Advisory validation limits.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Primary document options.
    #[serde(default)]
    pub openapi: OpenApiConfig,
    /// SLO bundle options.
    #[serde(default)]
    pub openslo: OpenSloConfig,
    /// Logging options for the CLI.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GeneratorConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.output.validate()?;
        self.validation.validate()?;
        self.openapi.validate()?;
        self.logging.validate()
    }
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Output location and naming.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving generated documents.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Base name override for generated file names.
    #[serde(default)]
    pub base_name: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            base_name: None,
        }
    }
}

impl OutputConfig {
    /// Validates output configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("output.dir", &self.dir.to_string_lossy())?;
        if let Some(base_name) = &self.base_name {
            validate_base_name(base_name)?;
        }
        Ok(())
    }
}

/// Advisory validation limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Maximum length of declared names.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    /// Maximum length of descriptions.
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
    /// URL schemes accepted for data source URLs.
    #[serde(default = "default_allowed_url_schemes")]
    pub allowed_url_schemes: Vec<String>,
    /// Fail the run when findings or validator messages exist.
    #[serde(default)]
    pub fail_on_findings: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
            max_description_length: default_max_description_length(),
            allowed_url_schemes: default_allowed_url_schemes(),
            fail_on_findings: false,
        }
    }
}

impl ValidationConfig {
    /// Validates validation configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_name_length == 0 {
            return Err(ConfigError::Invalid(
                "validation.max_name_length must be greater than zero".to_string(),
            ));
        }
        if self.max_description_length == 0 {
            return Err(ConfigError::Invalid(
                "validation.max_description_length must be greater than zero".to_string(),
            ));
        }
        if self.allowed_url_schemes.is_empty() {
            return Err(ConfigError::Invalid(
                "validation.allowed_url_schemes must be non-empty".to_string(),
            ));
        }
        for scheme in &self.allowed_url_schemes {
            let valid = scheme
                .chars()
                .next()
                .is_some_and(|first| first.is_ascii_alphabetic())
                && scheme.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));
            if !valid {
                return Err(ConfigError::Invalid(format!(
                    "validation.allowed_url_schemes contains invalid scheme: {scheme}"
                )));
            }
        }
        Ok(())
    }
}

/// Primary document options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenApiConfig {
    /// `info.version` used when the specification declares none.
    #[serde(default = "default_openapi_version")]
    pub default_version: String,
    /// Run the structural validator over the rendered document.
    #[serde(default = "default_run_validator")]
    pub run_validator: bool,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            default_version: default_openapi_version(),
            run_validator: default_run_validator(),
        }
    }
}

impl OpenApiConfig {
    /// Validates primary document options.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_version.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "openapi.default_version must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rendering of objectives when the indicator is a threshold metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdObjectives {
    /// A single empty objective replaces the declared list.
    #[default]
    Placeholder,
    /// Declared objectives render with operator and value.
    Full,
}

/// SLO bundle options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenSloConfig {
    /// Objective rendering for threshold indicators.
    #[serde(default)]
    pub threshold_objectives: ThresholdObjectives,
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default log level; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Validates logging options.
    fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading config.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
///
/// Returns `None` when no path was named and the default file is absent.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default_path = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default_path.is_file().then_some(default_path))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a base name: one normal path component, no separators.
fn validate_base_name(value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid("output.base_name must be non-empty".to_string()));
    }
    if trimmed.len() > MAX_PATH_COMPONENT_LENGTH {
        return Err(ConfigError::Invalid("output.base_name exceeds max length".to_string()));
    }
    let mut components = Path::new(trimmed).components();
    let single_normal = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();
    if !single_normal || trimmed.contains(['/', '\\']) {
        return Err(ConfigError::Invalid(
            "output.base_name must be a plain file name".to_string(),
        ));
    }
    Ok(())
}

/// Default output directory.
fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

/// Default maximum name length.
const fn default_max_name_length() -> usize {
    255
}

/// Default maximum description length.
const fn default_max_description_length() -> usize {
    1050
}

/// Default accepted URL schemes.
fn default_allowed_url_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string()]
}

/// Default `info.version`.
fn default_openapi_version() -> String {
    "1.0".to_string()
}

/// Validator runs by default.
const fn default_run_validator() -> bool {
    true
}

/// Default log level.
fn default_log_level() -> String {
    "info".to_string()
}
