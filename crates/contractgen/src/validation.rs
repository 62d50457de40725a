// crates/contractgen/src/validation.rs
// ============================================================================
// Module: Advisory Validation
// Description: Collects advisory findings over a service specification.
// Purpose: Surface field-length, URL, range, and companion-field problems.
// Dependencies: contractgen-core, contractgen-config, serde, url, tracing
// ============================================================================

//! ## Overview
//! Validation never fails: it walks the specification in declaration order and
//! returns every [`Finding`] it encounters. SLO templates are checked first
//! (including their built-in indicators and policies), then the top-level
//! indicators, alert policies, notification targets, and data sources.
//!
//! Subjects are dotted paths built from declared names, for example
//! `slo_templates.availability.objectives[0]`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use contractgen_config::ValidationConfig;
use contractgen_core::ServiceSpecification;
use contractgen_core::ast::AlertPolicy;
use contractgen_core::ast::DataSource;
use contractgen_core::ast::Indicator;
use contractgen_core::ast::IndicatorBinding;
use contractgen_core::ast::Metric;
use contractgen_core::ast::NotificationTarget;
use contractgen_core::ast::Objective;
use contractgen_core::ast::ObjectiveTarget;
use contractgen_core::ast::RatioShape;
use contractgen_core::ast::SloTemplate;
use serde::Serialize;
use tracing::debug;
use url::Url;

// ============================================================================
// SECTION: Findings
// ============================================================================

/// Category of an advisory finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    /// A name or description exceeds its configured limit.
    FieldTooLong,
    /// A URL does not parse.
    InvalidUrl,
    /// A URL uses a scheme outside the allowed list.
    WrongProtocol,
    /// A value is outside its valid range or contradicts another value.
    NotSetCorrectly,
    /// An attribute is declared where it has no effect.
    NotNecessary,
    /// A required companion attribute is missing.
    MissingAttribute,
}

impl FindingCode {
    /// Returns the stable code label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FieldTooLong => "FIELD_TOO_LONG",
            Self::InvalidUrl => "INVALID_URL",
            Self::WrongProtocol => "WRONG_PROTOCOL",
            Self::NotSetCorrectly => "NOT_SET_CORRECTLY",
            Self::NotNecessary => "NOT_NECESSARY",
            Self::MissingAttribute => "MISSING_ATTRIBUTE",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory finding over the input specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Finding category.
    pub code: FindingCode,
    /// Dotted path of the offending element.
    pub subject: String,
    /// Human-readable explanation.
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.code, self.subject, self.message)
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Returns every advisory finding over `spec`, in declaration order.
#[must_use]
pub fn validate(spec: &ServiceSpecification, config: &ValidationConfig) -> Vec<Finding> {
    let mut checker = Checker {
        spec,
        config,
        findings: Vec::new(),
    };
    for template in &spec.slo_templates {
        checker.slo_template(template);
    }
    for indicator in &spec.indicators {
        checker.indicator(&format!("indicators.{}", indicator.name), indicator);
    }
    for policy in &spec.alert_policies {
        checker.alert_policy(&format!("alert_policies.{}", policy.name), policy);
    }
    for target in &spec.notification_targets {
        checker.notification_target(target);
    }
    for data_source in &spec.data_sources {
        checker.data_source(data_source);
    }
    debug!(findings = checker.findings.len(), "validated specification");
    checker.findings
}

// ============================================================================
// SECTION: Checker
// ============================================================================

/// Accumulates findings during one validation pass.
struct Checker<'a> {
    /// Specification used to resolve indicator references.
    spec: &'a ServiceSpecification,
    /// Configured limits.
    config: &'a ValidationConfig,
    /// Findings in discovery order.
    findings: Vec<Finding>,
}

impl Checker<'_> {
    /// Records a finding.
    fn push(&mut self, code: FindingCode, subject: impl Into<String>, message: impl Into<String>) {
        self.findings.push(Finding {
            code,
            subject: subject.into(),
            message: message.into(),
        });
    }

    /// Checks a name against the name limit.
    fn name(&mut self, subject: &str, name: &str) {
        let limit = self.config.max_name_length;
        if name.chars().count() > limit {
            self.push(
                FindingCode::FieldTooLong,
                format!("{subject}.name"),
                format!("name exceeds {limit} characters"),
            );
        }
    }

    /// Checks an optional description against the description limit.
    fn description(&mut self, subject: &str, description: Option<&str>) {
        let limit = self.config.max_description_length;
        if description.is_some_and(|text| text.chars().count() > limit) {
            self.push(
                FindingCode::FieldTooLong,
                format!("{subject}.description"),
                format!("description exceeds {limit} characters"),
            );
        }
    }

    /// Checks an SLO template and everything declared inline in it.
    fn slo_template(&mut self, template: &SloTemplate) {
        let subject = format!("slo_templates.{}", template.name);
        self.name(&subject, &template.name);
        self.description(&subject, template.description.as_deref());

        let window = &template.time_window;
        if window.calendar.is_none() && !window.rolling {
            self.push(
                FindingCode::NotSetCorrectly,
                format!("{subject}.time_window"),
                "time window without calendar must be rolling",
            );
        }

        let indicator = match &template.indicator {
            IndicatorBinding::BuiltIn(indicator) => {
                self.indicator(&format!("{subject}.indicator"), indicator);
                Some(indicator)
            }
            IndicatorBinding::External(name) => {
                self.spec.indicators.iter().find(|indicator| &indicator.name == name)
            }
        };
        let threshold = indicator.is_some_and(|indicator| indicator.metric.is_threshold());
        for (index, objective) in template.objectives.iter().enumerate() {
            self.objective(&format!("{subject}.objectives[{index}]"), objective, threshold);
        }
        for policy in &template.built_in_alert_policies {
            self.alert_policy(&format!("{subject}.alert_policies.{}", policy.name), policy);
        }
    }

    /// Checks one objective.
    fn objective(&mut self, subject: &str, objective: &Objective, threshold: bool) {
        match objective.target {
            ObjectiveTarget::Fraction(target) if !(0.0..1.0).contains(&target) => {
                self.push(
                    FindingCode::NotSetCorrectly,
                    format!("{subject}.target"),
                    format!("target {target} must be within [0.0, 1.0)"),
                );
            }
            ObjectiveTarget::Percent(target) if !(0.0..100.0).contains(&target) => {
                self.push(
                    FindingCode::NotSetCorrectly,
                    format!("{subject}.target_percent"),
                    format!("target percent {target} must be within [0.0, 100.0)"),
                );
            }
            _ => {}
        }
        if !threshold && objective.operator.is_some() {
            self.push(
                FindingCode::NotNecessary,
                format!("{subject}.operator"),
                "comparison operator only applies to threshold metrics",
            );
        }
    }

    /// Checks an indicator.
    fn indicator(&mut self, subject: &str, indicator: &Indicator) {
        self.name(subject, &indicator.name);
        if let Metric::Ratio(ratio) = &indicator.metric
            && let RatioShape::Raw {
                raw_type: None, ..
            } = ratio.shape
        {
            self.push(
                FindingCode::MissingAttribute,
                format!("{subject}.metric.raw_type"),
                "raw ratio metric requires a raw type",
            );
        }
    }

    /// Checks an alert policy and its conditions.
    fn alert_policy(&mut self, subject: &str, policy: &AlertPolicy) {
        self.name(subject, &policy.name);
        self.description(subject, policy.description.as_deref());
        for condition in &policy.conditions {
            let condition_subject = format!("{subject}.conditions.{}", condition.name);
            self.name(&condition_subject, &condition.name);
            self.description(&condition_subject, condition.description.as_deref());
        }
    }

    /// Checks a notification target.
    fn notification_target(&mut self, target: &NotificationTarget) {
        let subject = format!("notification_targets.{}", target.name);
        self.name(&subject, &target.name);
        self.description(&subject, target.description.as_deref());
    }

    /// Checks a data source and its URL.
    fn data_source(&mut self, data_source: &DataSource) {
        let subject = format!("data_sources.{}", data_source.name);
        self.name(&subject, &data_source.name);
        self.description(&subject, data_source.description.as_deref());
        match Url::parse(&data_source.url) {
            Ok(url) => {
                let allowed = &self.config.allowed_url_schemes;
                if !allowed.iter().any(|scheme| scheme.eq_ignore_ascii_case(url.scheme())) {
                    self.push(
                        FindingCode::WrongProtocol,
                        format!("{subject}.url"),
                        format!("scheme {} is not one of {}", url.scheme(), allowed.join(", ")),
                    );
                }
            }
            Err(err) => {
                self.push(
                    FindingCode::InvalidUrl,
                    format!("{subject}.url"),
                    format!("invalid url {}: {err}", data_source.url),
                );
            }
        }
    }
}
