// crates/contractgen-core/src/ast/mod.rs
// ============================================================================
// Module: Contract AST
// Description: Typed input tree for one service specification.
// Purpose: Provide the read-only node contract the generators consume.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The parser lives outside this workspace. It hands over a complete service
//! specification as a serialized tree that deserializes into these nodes. The
//! tree is immutable for the duration of one generation run.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod number;
pub mod payload;
pub mod sla;
pub mod slo;

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use number::Number;
pub use payload::AtomicParameter;
pub use payload::AtomicParameterList;
pub use payload::CardinalityMarker;
pub use payload::DataTypeDecl;
pub use payload::ElementStructure;
pub use payload::EndpointDecl;
pub use payload::GenericParameter;
pub use payload::HttpMethod;
pub use payload::MessageDecl;
pub use payload::OperationDecl;
pub use payload::ParameterTree;
pub use payload::PrimitiveType;
pub use payload::SingleParameterNode;
pub use payload::TreeNode;
pub use payload::TypeReference;
pub use sla::InternalSla;
pub use sla::LandingZone;
pub use sla::RateLimit;
pub use sla::SimpleMeasurement;
pub use sla::SlaMeasurement;
pub use sla::SlaObjective;
pub use sla::SlaTemplate;
pub use slo::AlertCondition;
pub use slo::AlertPolicy;
pub use slo::CalendarWindow;
pub use slo::Condition;
pub use slo::DataSource;
pub use slo::Duration;
pub use slo::Indicator;
pub use slo::IndicatorBinding;
pub use slo::Metric;
pub use slo::MetricSource;
pub use slo::NotificationTarget;
pub use slo::Objective;
pub use slo::ObjectiveTarget;
pub use slo::RatioMetric;
pub use slo::RatioShape;
pub use slo::Service;
pub use slo::SliceWindow;
pub use slo::SloTemplate;
pub use slo::ThresholdMetric;
pub use slo::TimeWindow;

// ============================================================================
// SECTION: Service Specification
// ============================================================================

/// Root node of a parsed service contract document.
///
/// # Invariants
/// - Every collection preserves declaration order.
/// - OpenSLO declarations are referenced by name from templates and policies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpecification {
    /// Specification name.
    pub name: String,
    /// Optional version label.
    #[serde(default)]
    pub version: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Named data type declarations.
    #[serde(default)]
    pub data_types: Vec<DataTypeDecl>,
    /// Endpoint contracts.
    #[serde(default)]
    pub endpoints: Vec<EndpointDecl>,
    /// SLA templates.
    #[serde(default)]
    pub sla_templates: Vec<SlaTemplate>,
    /// SLO templates.
    #[serde(default)]
    pub slo_templates: Vec<SloTemplate>,
    /// Top-level indicator declarations.
    #[serde(default)]
    pub indicators: Vec<Indicator>,
    /// Top-level alert policy declarations.
    #[serde(default)]
    pub alert_policies: Vec<AlertPolicy>,
    /// Top-level notification target declarations.
    #[serde(default)]
    pub notification_targets: Vec<NotificationTarget>,
    /// Top-level data source declarations.
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
    /// Top-level service declarations.
    #[serde(default)]
    pub services: Vec<Service>,
}
