// crates/contractgen-core/src/ast/sla.rs
// ============================================================================
// Module: SLA Template AST
// Description: Service level agreement templates and their internal rules.
// Purpose: Carry SLA objectives, rate limits, and penalties to the renderer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An SLA template bundles internal SLA entries. Each entry holds objectives
//! measured either by a simple measurement or by a landing zone, and may carry
//! penalties, reporting text, a rate plan label, and rate limits. Every
//! optional attribute stays `None` when absent so the renderer can omit it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::ast::Number;

// ============================================================================
// SECTION: Measurements
// ============================================================================

/// Numeric measurement with an optional unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleMeasurement {
    /// Measured value.
    pub value: Number,
    /// Optional unit of measure.
    #[serde(default)]
    pub unit: Option<String>,
}

impl SimpleMeasurement {
    /// Creates a measurement with a unit.
    #[must_use]
    pub fn new(value: impl Into<Number>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: Some(unit.into()),
        }
    }
}

/// Two- or three-point landing zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingZone {
    /// Minimal acceptable measurement.
    pub minimal: SimpleMeasurement,
    /// Target measurement.
    pub target: SimpleMeasurement,
    /// Optional stretch measurement.
    #[serde(default)]
    pub optional: Option<SimpleMeasurement>,
}

/// Measurement attached to an SLA objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaMeasurement {
    /// Single measurement.
    Simple(SimpleMeasurement),
    /// Landing zone.
    LandingZone(LandingZone),
}

// ============================================================================
// SECTION: Templates
// ============================================================================

/// Objective inside an internal SLA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaObjective {
    /// Objective name.
    pub name: String,
    /// Quality goal label.
    pub quality_goal: String,
    /// Measurement of the goal.
    pub measurement: SlaMeasurement,
}

/// Rate limit rule.
///
/// Both rates are optional in the source grammar; the renderer classifies the
/// rule by whichever is populated, call rate first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Maximum call rate.
    #[serde(default)]
    pub call_rate: Option<SimpleMeasurement>,
    /// Maximum data volume.
    #[serde(default)]
    pub data_rate: Option<SimpleMeasurement>,
    /// Interval the limit applies to.
    #[serde(default)]
    pub interval: Option<SimpleMeasurement>,
}

/// Internal SLA entry of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalSla {
    /// SLA rule type (for example `availability`).
    pub sla_type: String,
    /// Objectives in declaration order.
    #[serde(default)]
    pub slos: Vec<SlaObjective>,
    /// Optional penalty text.
    #[serde(default)]
    pub penalties: Option<String>,
    /// Optional reporting/notification text.
    #[serde(default)]
    pub reporting: Option<String>,
    /// Optional rate plan label.
    #[serde(default)]
    pub rate_plan: Option<String>,
    /// Rate limits in declaration order.
    #[serde(default)]
    pub rate_limits: Vec<RateLimit>,
}

/// Named SLA template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaTemplate {
    /// Template name.
    pub name: String,
    /// Internal SLA entries in declaration order.
    #[serde(default)]
    pub slas: Vec<InternalSla>,
}
