// crates/contractgen/src/generator.rs
// ============================================================================
// Module: Generation Run
// Description: Orchestrates one generation run and writes its artifacts.
// Purpose: Assemble deterministic contract outputs and write them to disk.
// Dependencies: contractgen-core, contractgen-config, cap-std, tracing
// ============================================================================

//! ## Overview
//! A [`Generator`] turns one service specification into a
//! [`GenerationBundle`]: the primary contract, the SLA extension document when
//! SLA templates exist, and one SLO bundle per SLO template. Artifacts are
//! ordered by path and every path is derived from the base name, so repeated
//! runs over the same input produce byte-identical output.
//!
//! Every artifact is a plain file name directly under the output directory.
//! Writes go through a capability handle on that directory and replace each
//! file through a temporary sibling. Verification compares bytes and flags
//! leftover files of the same base name, such as the bundle of a removed SLO
//! template; unrelated files are left alone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use contractgen_config::GeneratorConfig;
use contractgen_core::ServiceSpecification;
use contractgen_core::build_model;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::GenerationError;
use crate::document::to_yaml;
use crate::openapi;
use crate::openapi::ContractRenderer;
use crate::openslo::BUNDLE_INFIX;
use crate::openslo::SloBundleRenderer;
use crate::openslo::YAML_EXTENSION;
use crate::schemas;
use crate::sla;
use crate::types::GeneratedArtifact;
use crate::types::GenerationBundle;
use crate::validation;

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Runs generation for service specifications.
///
/// # Invariants
/// - Bundles returned by [`Generator::build`] are ordered by path and paths
///   are unique.
/// - Nothing is written when a run fails.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    /// Run configuration.
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator with the given configuration.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds every artifact for `spec` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when a reference does not resolve, when
    /// serialization fails, or when findings exist and the configuration
    /// rejects them.
    pub fn build(
        &self,
        spec: &ServiceSpecification,
        base_name: &str,
    ) -> Result<GenerationBundle, GenerationError> {
        info!(spec = spec.name.as_str(), base_name, "generation run started");
        let findings = validation::validate(spec, &self.config.validation);
        for finding in &findings {
            warn!(code = finding.code.as_str(), subject = finding.subject.as_str(), "{}", finding.message);
        }

        let model = build_model(spec)?;
        let mut artifacts = Vec::new();

        let sla_file = if spec.sla_templates.is_empty() {
            None
        } else {
            let (path, text) = sla::render(&spec.sla_templates, base_name)?;
            artifacts.push(GeneratedArtifact::yaml(path.clone(), text));
            Some(path)
        };

        let mut bundle_files = Vec::new();
        if !spec.slo_templates.is_empty() {
            let renderer = SloBundleRenderer::new(spec, self.config.openslo.threshold_objectives);
            for bundle in renderer.render(base_name)? {
                artifacts.push(GeneratedArtifact::yaml(bundle.file_name.clone(), bundle.documents.render()?));
                bundle_files.push(bundle.file_name);
            }
        }

        let mut contract = ContractRenderer::new(spec, &model, &self.config.openapi).render()?;
        openapi::attach_extensions(&mut contract, sla_file.as_deref(), &bundle_files);
        let contract_text = to_yaml(&contract)?;
        let validator_messages = if self.config.openapi.run_validator {
            schemas::validate_contract_text(&contract_text)?
        } else {
            Vec::new()
        };
        for message in &validator_messages {
            warn!(message = message.as_str(), "contract validator message");
        }
        artifacts.push(GeneratedArtifact::yaml(openapi::contract_file_name(base_name), contract_text));

        if self.config.validation.fail_on_findings
            && (!findings.is_empty() || !validator_messages.is_empty())
        {
            return Err(GenerationError::FindingsRejected(format!(
                "{} finding(s), {} validator message(s)",
                findings.len(),
                validator_messages.len()
            )));
        }

        artifacts.sort_by(|lhs, rhs| lhs.path.cmp(&rhs.path));
        check_artifact_names(&artifacts)?;
        info!(
            artifacts = artifacts.len(),
            findings = findings.len(),
            validator_messages = validator_messages.len(),
            "generation run complete"
        );
        Ok(GenerationBundle {
            artifacts,
            findings,
            validator_messages,
        })
    }

    /// Builds and writes every artifact under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when generation or writing fails.
    pub fn write_to(
        &self,
        spec: &ServiceSpecification,
        base_name: &str,
        output_dir: &Path,
    ) -> Result<GenerationBundle, GenerationError> {
        let bundle = self.build(spec, base_name)?;
        let output = open_output_dir(output_dir, true)?;
        for artifact in &bundle.artifacts {
            write_artifact(&output, artifact)?;
            debug!(path = artifact.path.as_str(), bytes = artifact.bytes.len(), "wrote artifact");
        }
        info!(dir = %output_dir.display(), artifacts = bundle.artifacts.len(), "wrote generated output");
        Ok(bundle)
    }

    /// Verifies that `output_dir` holds exactly the artifacts of a fresh run.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Generation`] on missing, mismatched, or
    /// unexpected files.
    pub fn verify_output(
        &self,
        spec: &ServiceSpecification,
        base_name: &str,
        output_dir: &Path,
    ) -> Result<(), GenerationError> {
        let bundle = self.build(spec, base_name)?;
        let output = open_output_dir(output_dir, false)?;
        for artifact in &bundle.artifacts {
            verify_artifact(&output, artifact)?;
        }
        let expected: BTreeSet<&str> =
            bundle.artifacts.iter().map(|artifact| artifact.path.as_str()).collect();
        if let Some(name) = stale_artifacts(&output, base_name, &expected)?.first() {
            return Err(GenerationError::Generation(format!("unexpected artifact: {name}")));
        }
        debug!(artifacts = bundle.artifacts.len(), "verified generated output");
        Ok(())
    }
}

// ============================================================================
// SECTION: Artifact Names
// ============================================================================

/// Checks that every artifact is a plain, unique file name.
///
/// Base names and SLO template names flow into file names, so a separator or
/// a repeated template name surfaces here.
fn check_artifact_names(artifacts: &[GeneratedArtifact]) -> Result<(), GenerationError> {
    let mut seen = BTreeSet::new();
    for artifact in artifacts {
        check_file_name(&artifact.path)?;
        if !seen.insert(artifact.path.as_str()) {
            return Err(GenerationError::Generation(format!(
                "duplicate artifact: {}",
                artifact.path
            )));
        }
    }
    Ok(())
}

/// Rejects names that are empty, relative markers, or contain separators.
fn check_file_name(name: &str) -> Result<(), GenerationError> {
    let plain = !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if plain {
        Ok(())
    } else {
        Err(GenerationError::OutputPath(PathBuf::from(name)))
    }
}

/// Returns true when `file_name` is one of the files a run for `base_name`
/// can produce.
fn belongs_to_run(base_name: &str, file_name: &str) -> bool {
    file_name == openapi::contract_file_name(base_name)
        || file_name == sla::sla_file_name(base_name)
        || file_name
            .strip_prefix(base_name)
            .and_then(|rest| rest.strip_prefix(BUNDLE_INFIX))
            .is_some_and(|rest| rest.ends_with(YAML_EXTENSION))
}

// ============================================================================
// SECTION: Output Directory
// ============================================================================

/// Opens the output directory, creating it first when asked.
fn open_output_dir(output_dir: &Path, create_missing: bool) -> Result<Dir, GenerationError> {
    if output_dir.as_os_str().is_empty() {
        return Err(GenerationError::OutputPath(output_dir.to_path_buf()));
    }
    if create_missing {
        Dir::create_ambient_dir_all(output_dir, ambient_authority())
            .map_err(|err| output_error(&err, output_dir))?;
    }
    Dir::open_ambient_dir(output_dir, ambient_authority())
        .map_err(|err| output_error(&err, output_dir))
}

/// Maps an output directory failure to an error naming the directory.
fn output_error(err: &std::io::Error, path: &Path) -> GenerationError {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::PermissionDenied => {
            GenerationError::OutputPath(path.to_path_buf())
        }
        _ => GenerationError::Io(format!("{}: {err}", path.display())),
    }
}

/// Replaces one document through a temporary sibling and a rename.
fn write_artifact(output: &Dir, artifact: &GeneratedArtifact) -> Result<(), GenerationError> {
    let temp_name = format!(".{}.{}.tmp", artifact.path, std::process::id());
    let written = output
        .write(&temp_name, &artifact.bytes)
        .and_then(|()| output.rename(&temp_name, output, &artifact.path));
    if let Err(err) = written {
        let _ = output.remove_file(&temp_name);
        return Err(GenerationError::Io(format!("write {}: {err}", artifact.path)));
    }
    Ok(())
}

/// Compares one document on disk with its freshly rendered bytes.
fn verify_artifact(output: &Dir, artifact: &GeneratedArtifact) -> Result<(), GenerationError> {
    let metadata = output.symlink_metadata(&artifact.path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            GenerationError::Generation(format!("missing artifact: {}", artifact.path))
        } else {
            GenerationError::Io(format!("{}: {err}", artifact.path))
        }
    })?;
    if !metadata.is_file() {
        return Err(GenerationError::OutputPath(PathBuf::from(&artifact.path)));
    }
    let bytes = output
        .read(&artifact.path)
        .map_err(|err| GenerationError::Io(format!("read {}: {err}", artifact.path)))?;
    if bytes != artifact.bytes {
        return Err(GenerationError::Generation(format!("artifact mismatch: {}", artifact.path)));
    }
    Ok(())
}

/// Returns files in the output directory that a run for `base_name` could
/// have written but the current run did not.
fn stale_artifacts(
    output: &Dir,
    base_name: &str,
    expected: &BTreeSet<&str>,
) -> Result<Vec<String>, GenerationError> {
    let mut stale = Vec::new();
    let entries = output.entries().map_err(|err| GenerationError::Io(err.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|err| GenerationError::Io(err.to_string()))?;
        let Some(name) = entry.file_name().to_str().map(ToString::to_string) else {
            continue;
        };
        if belongs_to_run(base_name, &name) && !expected.contains(name.as_str()) {
            stale.push(name);
        }
    }
    stale.sort();
    Ok(stale)
}

#[cfg(test)]
mod tests;
