// crates/contractgen/src/main.rs
// ============================================================================
// Module: contractgen CLI Entry Point
// Description: Command dispatcher for generation, verification, and linting.
// Purpose: Run generation over a specification file from the command line.
// Dependencies: clap, contractgen, contractgen-config, serde_json, tracing-subscriber
// ============================================================================

//! ## Overview
//! `generate` writes every artifact for one specification, `check` verifies
//! that an output directory matches a fresh run byte for byte, and `lint`
//! prints the advisory findings without generating anything. Logging goes to
//! stderr; `RUST_LOG` overrides the configured level.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use contractgen::Generator;
use contractgen::input::base_name_for;
use contractgen::input::load_specification;
use contractgen::validation::validate;
use contractgen_config::GeneratorConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Arguments
// ============================================================================

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(name = "contractgen", version, about = "Generate API, SLA, and SLO contracts")]
struct Cli {
    /// Configuration file path.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Command to run.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate every artifact for a specification.
    Generate(RunArgs),
    /// Verify that an output directory matches a fresh run.
    Check(RunArgs),
    /// Print advisory findings for a specification.
    Lint(LintArgs),
}

/// Arguments shared by `generate` and `check`.
#[derive(Args, Debug)]
struct RunArgs {
    /// Specification file (`.json`, otherwise YAML).
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Output directory; defaults to the configured directory.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

/// Arguments for `lint`.
#[derive(Args, Debug)]
struct LintArgs {
    /// Specification file (`.json`, otherwise YAML).
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Finding output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// One finding per line.
    Text,
    /// JSON array of findings.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Runs the CLI and maps failures to a non-zero exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config = GeneratorConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("config: {err}")))?;
    init_logging(&config.logging.level);
    match cli.command {
        Commands::Generate(args) => command_generate(config, &args),
        Commands::Check(args) => command_check(config, &args),
        Commands::Lint(args) => command_lint(&config, &args),
    }
}

/// Installs the stderr log subscriber.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Runs `generate`.
fn command_generate(config: GeneratorConfig, args: &RunArgs) -> CliResult<ExitCode> {
    let spec = load_specification(&args.input).map_err(|err| CliError::new(err.to_string()))?;
    let base_name = base_name_for(&args.input, &config.output);
    let out = output_dir(&config, args.out.as_deref());
    let generator = Generator::new(config);
    let bundle = generator
        .write_to(&spec, &base_name, &out)
        .map_err(|err| CliError::new(err.to_string()))?;
    for artifact in &bundle.artifacts {
        write_stdout_line(&out.join(&artifact.path).display().to_string())?;
    }
    for finding in &bundle.findings {
        write_stderr_line(&format!("warning: {finding}"))?;
    }
    for message in &bundle.validator_messages {
        write_stderr_line(&format!("warning: contract validator: {message}"))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Runs `check`.
fn command_check(config: GeneratorConfig, args: &RunArgs) -> CliResult<ExitCode> {
    let spec = load_specification(&args.input).map_err(|err| CliError::new(err.to_string()))?;
    let base_name = base_name_for(&args.input, &config.output);
    let out = output_dir(&config, args.out.as_deref());
    Generator::new(config)
        .verify_output(&spec, &base_name, &out)
        .map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format!("{} is up to date", out.display()))?;
    Ok(ExitCode::SUCCESS)
}

/// Runs `lint`.
fn command_lint(config: &GeneratorConfig, args: &LintArgs) -> CliResult<ExitCode> {
    let spec = load_specification(&args.input).map_err(|err| CliError::new(err.to_string()))?;
    let findings = validate(&spec, &config.validation);
    match args.format {
        OutputFormat::Text => {
            for finding in &findings {
                write_stdout_line(&finding.to_string())?;
            }
        }
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&findings)
                .map_err(|err| CliError::new(format!("serialize findings: {err}")))?;
            write_stdout_line(&text)?;
        }
    }
    if config.validation.fail_on_findings && !findings.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Returns the output directory from the flag or the configuration.
fn output_dir(config: &GeneratorConfig, flag: Option<&Path>) -> PathBuf {
    flag.map_or_else(|| config.output.dir.clone(), Path::to_path_buf)
}

/// Writes one line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| CliError::new(format!("stdout: {err}")))
}

/// Writes one line to stderr.
fn write_stderr_line(message: &str) -> CliResult<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}").map_err(|err| CliError::new(format!("stderr: {err}")))
}

/// Reports an error and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(&format!("error: {message}"));
    ExitCode::FAILURE
}
