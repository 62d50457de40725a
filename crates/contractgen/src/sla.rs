// crates/contractgen/src/sla.rs
// ============================================================================
// Module: SLA Extension Renderer
// Description: Renders SLA templates into the SLA extension document.
// Purpose: Produce `<base>-sla.yaml` and the reference the contract carries.
// Dependencies: contractgen-core, serde_json, tracing
// ============================================================================

//! ## Overview
//! The SLA document carries a version marker and the rendered templates in
//! declaration order. Optional attributes are emitted only when present in the
//! source; there are no null or empty placeholders.
//!
//! Each rate limit is classified by the first populated measurement: call
//! rate, then data rate, otherwise none.

// ============================================================================
// SECTION: Imports
// ============================================================================

use contractgen_core::ast::InternalSla;
use contractgen_core::ast::LandingZone;
use contractgen_core::ast::RateLimit;
use contractgen_core::ast::SimpleMeasurement;
use contractgen_core::ast::SlaMeasurement;
use contractgen_core::ast::SlaObjective;
use contractgen_core::ast::SlaTemplate;
use serde_json::Value;
use tracing::debug;

use crate::GenerationError;
use crate::document::Document;
use crate::document::insert_optional;
use crate::document::to_yaml;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File name suffix of the SLA document.
pub const SLA_FILE_SUFFIX: &str = "-sla.yaml";
/// Version marker written into the SLA document.
pub const SLA_DOC_VERSION: &str = "1.0";
/// Key of the version marker.
const DOC_VERSION_KEY: &str = "sla-doc-version";
/// Key of the template list.
const TEMPLATES_KEY: &str = "sla-templates";
/// Key of the rate limit list inside an SLA entry.
const RATE_LIMITS_KEY: &str = "rate limits";
/// Literal stripped from rate plan labels.
const RATE_PLAN_LITERAL: &str = "rate plan";

// ============================================================================
// SECTION: Rate Limits
// ============================================================================

/// Classification of a rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitKind {
    /// Bounded number of calls.
    MaxCalls,
    /// Bounded data volume.
    DataQuota,
    /// No measurement declared.
    None,
}

impl RateLimitKind {
    /// Classifies a rate limit; call rate wins over data rate.
    #[must_use]
    pub const fn classify(rate_limit: &RateLimit) -> Self {
        if rate_limit.call_rate.is_some() {
            Self::MaxCalls
        } else if rate_limit.data_rate.is_some() {
            Self::DataQuota
        } else {
            Self::None
        }
    }

    /// Returns the rendered label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxCalls => "MAX_CALLS",
            Self::DataQuota => "DATA_QUOTA",
            Self::None => "NONE",
        }
    }
}

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Returns the SLA document file name for a base name.
#[must_use]
pub fn sla_file_name(base_name: &str) -> String {
    format!("{base_name}{SLA_FILE_SUFFIX}")
}

/// Renders the SLA document for the given templates.
#[must_use]
pub fn render_sla_document(templates: &[SlaTemplate]) -> Value {
    let mut document = Document::new();
    document.insert(DOC_VERSION_KEY.to_string(), Value::from(SLA_DOC_VERSION));
    let rendered: Vec<Value> = templates.iter().map(render_template).collect();
    debug!(templates = rendered.len(), "rendered sla templates");
    document.insert(TEMPLATES_KEY.to_string(), Value::Array(rendered));
    Value::Object(document)
}

/// Renders the SLA document and returns its file name and text.
///
/// # Errors
///
/// Returns [`GenerationError::Serialization`] when serialization fails.
pub fn render(templates: &[SlaTemplate], base_name: &str) -> Result<(String, String), GenerationError> {
    let text = to_yaml(&render_sla_document(templates))?;
    Ok((sla_file_name(base_name), text))
}

/// Renders one template.
fn render_template(template: &SlaTemplate) -> Value {
    let mut document = Document::new();
    document.insert("name".to_string(), Value::from(template.name.as_str()));
    let slas = template.slas.iter().map(render_internal_sla).collect();
    document.insert("slas".to_string(), Value::Array(slas));
    Value::Object(document)
}

/// Renders one internal SLA entry.
fn render_internal_sla(sla: &InternalSla) -> Value {
    let mut document = Document::new();
    document.insert("type".to_string(), Value::from(sla.sla_type.as_str()));
    let slos = sla.slos.iter().map(render_objective).collect();
    document.insert("slos".to_string(), Value::Array(slos));
    insert_optional(&mut document, "penalty", sla.penalties.as_deref());
    insert_optional(&mut document, "notification", sla.reporting.as_deref());
    insert_optional(&mut document, "ratePlan", sla.rate_plan.as_deref().map(rate_plan_label));
    if !sla.rate_limits.is_empty() {
        let limits = sla.rate_limits.iter().map(render_rate_limit).collect();
        document.insert(RATE_LIMITS_KEY.to_string(), Value::Array(limits));
    }
    Value::Object(document)
}

/// Strips the rate plan literal and surrounding whitespace.
#[must_use]
pub fn rate_plan_label(raw: &str) -> String {
    raw.replace(RATE_PLAN_LITERAL, "").trim().to_string()
}

/// Renders one objective.
fn render_objective(objective: &SlaObjective) -> Value {
    let mut document = Document::new();
    document.insert("name".to_string(), Value::from(objective.name.as_str()));
    document.insert("qualityGoal".to_string(), Value::from(objective.quality_goal.as_str()));
    let measurement = match &objective.measurement {
        SlaMeasurement::Simple(simple) => render_measurement(simple),
        SlaMeasurement::LandingZone(zone) => render_landing_zone(zone),
    };
    document.insert("measurement".to_string(), measurement);
    Value::Object(document)
}

/// Renders one rate limit.
fn render_rate_limit(rate_limit: &RateLimit) -> Value {
    let mut document = Document::new();
    let kind = RateLimitKind::classify(rate_limit);
    document.insert("rateLimit".to_string(), Value::from(kind.as_str()));
    let measurement = rate_limit.call_rate.as_ref().or(rate_limit.data_rate.as_ref());
    insert_optional(&mut document, "measurement", measurement.map(render_measurement));
    insert_optional(&mut document, "interval", rate_limit.interval.as_ref().map(render_measurement));
    Value::Object(document)
}

/// Renders a simple measurement.
fn render_measurement(measurement: &SimpleMeasurement) -> Value {
    let mut document = Document::new();
    document.insert("value".to_string(), measurement.value.to_value());
    insert_optional(&mut document, "unit", measurement.unit.as_deref());
    Value::Object(document)
}

/// Renders a landing zone.
fn render_landing_zone(zone: &LandingZone) -> Value {
    let mut document = Document::new();
    document.insert("minimal".to_string(), render_measurement(&zone.minimal));
    document.insert("target".to_string(), render_measurement(&zone.target));
    insert_optional(&mut document, "optional", zone.optional.as_ref().map(render_measurement));
    Value::Object(document)
}
