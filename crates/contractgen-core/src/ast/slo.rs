// crates/contractgen-core/src/ast/slo.rs
// ============================================================================
// Module: SLO Template AST
// Description: OpenSLO-style templates, indicators, alerting, and data sources.
// Purpose: Model structural variants as sum types with name-based references.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! SLO templates reference services, indicators, alert policies, notification
//! targets, and data sources. Declarations live at the top of the service
//! specification and are referenced by their declared name; built-in variants
//! are carried inline. Alternatives the grammar offers (ratio vs threshold
//! metric, built-in vs external indicator, fraction vs percent target) are
//! enums rather than sets of nullable fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::ast::Number;

// ============================================================================
// SECTION: Time
// ============================================================================

/// Duration literal with a unit suffix (`h`, `m`, `d`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    /// Numeric amount.
    pub value: Number,
    /// Unit suffix.
    pub unit: String,
}

impl Duration {
    /// Creates a duration.
    #[must_use]
    pub fn new(value: impl Into<Number>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }
}

/// Renders the compact shorthand: value immediately followed by the unit.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Calendar anchor for a non-rolling time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWindow {
    /// Window start timestamp.
    pub start_time: String,
    /// IANA time zone name.
    pub time_zone: String,
}

/// Default for [`TimeWindow::rolling`].
const fn default_rolling() -> bool {
    true
}

/// SLO evaluation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window length.
    pub duration: Duration,
    /// Calendar anchor; absent for rolling windows.
    #[serde(default)]
    pub calendar: Option<CalendarWindow>,
    /// Rolling flag as declared by the author.
    #[serde(default = "default_rolling")]
    pub rolling: bool,
}

// ============================================================================
// SECTION: Indicators
// ============================================================================

/// Source of a metric query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSource {
    /// Name of the declared data source backing the query.
    #[serde(default)]
    pub data_source: Option<String>,
    /// Optional source type label.
    #[serde(default)]
    pub source_type: Option<String>,
    /// Free-form query specification.
    #[serde(default)]
    pub spec: Option<Value>,
}

/// Shape of a ratio metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioShape {
    /// Good events over total events.
    GoodTotal {
        /// Good event source.
        good: MetricSource,
        /// Total event source.
        total: MetricSource,
    },
    /// Bad events over total events.
    BadTotal {
        /// Bad event source.
        bad: MetricSource,
        /// Total event source.
        total: MetricSource,
    },
    /// Pre-computed raw ratio.
    Raw {
        /// Raw ratio type (`success` or `failure`); required companion of `raw`.
        #[serde(default)]
        raw_type: Option<String>,
        /// Raw ratio source.
        raw: MetricSource,
    },
}

impl RatioShape {
    /// Returns the populated sources in bad, good, total, raw order.
    #[must_use]
    pub fn sources(&self) -> Vec<&MetricSource> {
        match self {
            Self::GoodTotal {
                good,
                total,
            } => vec![good, total],
            Self::BadTotal {
                bad,
                total,
            } => vec![bad, total],
            Self::Raw {
                raw, ..
            } => vec![raw],
        }
    }
}

/// Ratio metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioMetric {
    /// Whether the sources are monotonic counters.
    #[serde(default)]
    pub counter: bool,
    /// Ratio shape.
    pub shape: RatioShape,
}

/// Threshold metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMetric {
    /// Measured source.
    pub metric_source: MetricSource,
}

/// Indicator metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Ratio of sub-measurements.
    Ratio(RatioMetric),
    /// Threshold on one measurement.
    Threshold(ThresholdMetric),
}

impl Metric {
    /// Returns true for threshold metrics.
    #[must_use]
    pub const fn is_threshold(&self) -> bool {
        matches!(self, Self::Threshold(_))
    }

    /// Returns every populated metric source.
    #[must_use]
    pub fn sources(&self) -> Vec<&MetricSource> {
        match self {
            Self::Ratio(ratio) => ratio.shape.sources(),
            Self::Threshold(threshold) => vec![&threshold.metric_source],
        }
    }
}

/// Service level indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Indicator name.
    pub name: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Measured metric.
    pub metric: Metric,
}

/// How an SLO template obtains its indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorBinding {
    /// Indicator declared inline in the template.
    BuiltIn(Indicator),
    /// Name of a top-level indicator declaration.
    External(String),
}

// ============================================================================
// SECTION: Objectives
// ============================================================================

/// Objective target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveTarget {
    /// Absolute fraction in `[0, 1)`.
    Fraction(f64),
    /// Percentage in `[0, 100)`.
    Percent(f64),
}

/// Time slice window of an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceWindow {
    /// Duration shorthand.
    Duration(Duration),
    /// Bare number.
    Numeric(Number),
}

/// SLO objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Comparison operator for threshold metrics.
    #[serde(default)]
    pub operator: Option<String>,
    /// Comparison value for threshold metrics.
    #[serde(default)]
    pub value: Option<Number>,
    /// Objective target.
    pub target: ObjectiveTarget,
    /// Time slice target for `Timeslices` budgeting.
    #[serde(default)]
    pub time_slice_target: Option<Number>,
    /// Time slice window for time-slice budgeting methods.
    #[serde(default)]
    pub time_slice_window: Option<SliceWindow>,
}

// ============================================================================
// SECTION: Alerting
// ============================================================================

/// Alert condition predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition kind (for example `burnrate`).
    pub kind: String,
    /// Comparison operator.
    pub operator: String,
    /// Threshold value.
    pub threshold: Number,
    /// Lookback window.
    pub lookback_window: Duration,
    /// Delay before alerting.
    pub alert_after: Duration,
}

/// Named alert condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCondition {
    /// Condition name.
    pub name: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Severity label.
    pub severity: String,
    /// Predicate.
    pub condition: Condition,
}

/// Alert policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPolicy {
    /// Policy name.
    pub name: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Alert when no data arrives.
    #[serde(default)]
    pub alert_when_no_data: bool,
    /// Alert when the breach resolves.
    #[serde(default)]
    pub alert_when_resolved: bool,
    /// Alert while breaching.
    #[serde(default)]
    pub alert_when_breaching: bool,
    /// Conditions in declaration order.
    #[serde(default)]
    pub conditions: Vec<AlertCondition>,
    /// Names of notification target declarations.
    #[serde(default)]
    pub notification_targets: Vec<String>,
}

/// Alert notification target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTarget {
    /// Target name.
    pub name: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Delivery target (channel, address, ...).
    pub target: String,
}

// ============================================================================
// SECTION: Services and Data Sources
// ============================================================================

/// External measurement system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    /// Data source name.
    pub name: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Data source type (for example `Prometheus`).
    pub source_type: String,
    /// Connection URL.
    pub url: String,
}

/// Service the SLOs apply to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name.
    pub name: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional purpose statement.
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// SECTION: Templates
// ============================================================================

/// SLO template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloTemplate {
    /// Template name; also part of the bundle file name.
    pub name: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the service declaration.
    pub service: String,
    /// Indicator binding.
    pub indicator: IndicatorBinding,
    /// Evaluation window.
    pub time_window: TimeWindow,
    /// Budgeting method (`Occurrences`, `Timeslices`, `RatioTimeslices`).
    pub budgeting_method: String,
    /// Objectives in declaration order.
    #[serde(default)]
    pub objectives: Vec<Objective>,
    /// Names of top-level alert policy declarations.
    #[serde(default)]
    pub external_alert_policies: Vec<String>,
    /// Alert policies declared inline.
    #[serde(default)]
    pub built_in_alert_policies: Vec<AlertPolicy>,
}
