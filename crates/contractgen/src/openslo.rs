// crates/contractgen/src/openslo.rs
// ============================================================================
// Module: SLO Bundle Renderer
// Description: Renders SLO templates into OpenSLO multi-document bundles.
// Purpose: Produce one `<base>-openslo-<template>.yaml` file per template.
// Dependencies: contractgen-core, contractgen-config, serde_json, tracing
// ============================================================================

//! ## Overview
//! Every SLO template becomes one bundle whose documents appear in a fixed
//! order:
//!
//! 1. the SLO document,
//! 2. the indicator document when the indicator is declared externally,
//! 3. each referenced alert policy (external first, then built-in),
//! 4. each notification target reached through those policies,
//! 5. the service,
//! 6. each data source reached through the indicator's metric sources.
//!
//! Policies, targets, and data sources are deduplicated by declared name and
//! keep first-occurrence order. Every name reference is resolved against the
//! specification's top-level declarations; an unknown name aborts the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use contractgen_config::ThresholdObjectives;
use contractgen_core::ServiceSpecification;
use contractgen_core::ast::AlertCondition;
use contractgen_core::ast::AlertPolicy;
use contractgen_core::ast::DataSource;
use contractgen_core::ast::Indicator;
use contractgen_core::ast::IndicatorBinding;
use contractgen_core::ast::Metric;
use contractgen_core::ast::MetricSource;
use contractgen_core::ast::NotificationTarget;
use contractgen_core::ast::Objective;
use contractgen_core::ast::ObjectiveTarget;
use contractgen_core::ast::RatioShape;
use contractgen_core::ast::Service;
use contractgen_core::ast::SliceWindow;
use contractgen_core::ast::SloTemplate;
use contractgen_core::ast::TimeWindow;
use serde_json::Value;
use tracing::debug;

use crate::GenerationError;
use crate::document::Document;
use crate::document::DocumentBundle;
use crate::document::insert_optional;
use crate::document::metadata;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// OpenSLO API version written into every document.
pub const OPENSLO_API_VERSION: &str = "openslo/v1";
/// Budgeting method that adds time slice target and window.
const TIMESLICES: &str = "Timeslices";
/// Budgeting method that adds the time slice window only.
const RATIO_TIMESLICES: &str = "RatioTimeslices";

// ============================================================================
// SECTION: Bundles
// ============================================================================

/// Rendered bundle for one SLO template.
#[derive(Debug, Clone, PartialEq)]
pub struct SloBundle {
    /// Output file name.
    pub file_name: String,
    /// Template name.
    pub template: String,
    /// Documents in output order.
    pub documents: DocumentBundle,
}

/// Text between the base name and the template name of a bundle file.
pub const BUNDLE_INFIX: &str = "-openslo-";
/// Extension of every bundle file.
pub const YAML_EXTENSION: &str = ".yaml";

/// Returns the bundle file name for a template.
#[must_use]
pub fn bundle_file_name(base_name: &str, template: &str) -> String {
    format!("{base_name}{BUNDLE_INFIX}{template}{YAML_EXTENSION}")
}

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Renders SLO bundles against one specification's declarations.
#[derive(Debug, Clone, Copy)]
pub struct SloBundleRenderer<'a> {
    /// Specification holding the referenced declarations.
    spec: &'a ServiceSpecification,
    /// Objective rendering for threshold indicators.
    threshold_objectives: ThresholdObjectives,
}

impl<'a> SloBundleRenderer<'a> {
    /// Creates a renderer over a specification.
    #[must_use]
    pub const fn new(spec: &'a ServiceSpecification, threshold_objectives: ThresholdObjectives) -> Self {
        Self {
            spec,
            threshold_objectives,
        }
    }

    /// Renders one bundle per SLO template, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingTemplates`] when no template exists
    /// and [`GenerationError::UnresolvedReference`] for unknown names.
    pub fn render(&self, base_name: &str) -> Result<Vec<SloBundle>, GenerationError> {
        if self.spec.slo_templates.is_empty() {
            return Err(GenerationError::MissingTemplates("SLO"));
        }
        self.spec.slo_templates.iter().map(|template| self.render_template(template, base_name)).collect()
    }

    /// Renders the bundle for one template.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnresolvedReference`] for unknown names.
    pub fn render_template(
        &self,
        template: &'a SloTemplate,
        base_name: &str,
    ) -> Result<SloBundle, GenerationError> {
        let indicator = self.indicator_of(template)?;
        let policies = self.policies_of(template)?;
        let mut documents = DocumentBundle::new();
        documents.push(self.slo_document(template, indicator, &policies));

        if matches!(template.indicator, IndicatorBinding::External(_)) {
            let mut sli = Document::new();
            sli.insert("apiVersion".to_string(), Value::from(OPENSLO_API_VERSION));
            sli.insert("kind".to_string(), Value::from("SLI"));
            if let Value::Object(body) = indicator_document(indicator) {
                sli.extend(body);
            }
            documents.push(Value::Object(sli));
        }

        for policy in &policies {
            documents.push(alert_policy_document(policy));
        }
        for target in self.targets_of(&policies)? {
            documents.push(notification_target_document(target));
        }
        documents.push(service_document(self.service(&template.service)?));
        for data_source in self.data_sources_of(indicator)? {
            documents.push(data_source_document(data_source));
        }

        debug!(
            template = template.name.as_str(),
            documents = documents.len(),
            "rendered openslo bundle"
        );
        Ok(SloBundle {
            file_name: bundle_file_name(base_name, &template.name),
            template: template.name.clone(),
            documents,
        })
    }

    /// Builds the SLO document; `policies` are already deduplicated.
    fn slo_document(
        &self,
        template: &SloTemplate,
        indicator: &Indicator,
        policies: &[&AlertPolicy],
    ) -> Value {
        let mut spec = Document::new();
        insert_optional(&mut spec, "description", template.description.as_deref());
        spec.insert("service".to_string(), Value::from(template.service.as_str()));
        match &template.indicator {
            IndicatorBinding::BuiltIn(built_in) => {
                spec.insert("indicator".to_string(), indicator_document(built_in));
            }
            IndicatorBinding::External(name) => {
                spec.insert("indicatorRef".to_string(), Value::from(name.as_str()));
            }
        }
        spec.insert("timeWindow".to_string(), time_window(&template.time_window));
        spec.insert("budgetingMethod".to_string(), Value::from(template.budgeting_method.as_str()));
        spec.insert("objectives".to_string(), self.objectives(template, indicator));
        let policy_names: Vec<Value> =
            policies.iter().map(|policy| Value::from(policy.name.as_str())).collect();
        spec.insert("alertPolicies".to_string(), Value::Array(policy_names));
        kind_document("SLO", &template.name, template.display_name.as_deref(), spec)
    }

    /// Builds the objectives list.
    fn objectives(&self, template: &SloTemplate, indicator: &Indicator) -> Value {
        let threshold = indicator.metric.is_threshold();
        if threshold && self.threshold_objectives == ThresholdObjectives::Placeholder {
            return Value::Array(vec![Value::Object(Document::new())]);
        }
        let objectives = template
            .objectives
            .iter()
            .map(|objective| objective_document(objective, threshold, &template.budgeting_method))
            .collect();
        Value::Array(objectives)
    }

    /// Resolves the template's indicator.
    fn indicator_of(&self, template: &'a SloTemplate) -> Result<&'a Indicator, GenerationError> {
        match &template.indicator {
            IndicatorBinding::BuiltIn(indicator) => Ok(indicator),
            IndicatorBinding::External(name) => {
                find(&self.spec.indicators, name, |indicator| &indicator.name, "indicator")
            }
        }
    }

    /// Resolves and deduplicates the template's alert policies.
    fn policies_of(&self, template: &'a SloTemplate) -> Result<Vec<&'a AlertPolicy>, GenerationError> {
        let mut seen = HashSet::new();
        let mut policies = Vec::new();
        for name in &template.external_alert_policies {
            let policy = find(&self.spec.alert_policies, name, |policy| &policy.name, "alert policy")?;
            if seen.insert(policy.name.as_str()) {
                policies.push(policy);
            }
        }
        for policy in &template.built_in_alert_policies {
            if seen.insert(policy.name.as_str()) {
                policies.push(policy);
            }
        }
        Ok(policies)
    }

    /// Resolves and deduplicates the notification targets of the policies.
    fn targets_of(
        &self,
        policies: &[&'a AlertPolicy],
    ) -> Result<Vec<&'a NotificationTarget>, GenerationError> {
        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for policy in policies {
            for name in &policy.notification_targets {
                if seen.insert(name.as_str()) {
                    targets.push(find(
                        &self.spec.notification_targets,
                        name,
                        |target| &target.name,
                        "notification target",
                    )?);
                }
            }
        }
        Ok(targets)
    }

    /// Resolves and deduplicates the data sources reached by an indicator.
    fn data_sources_of(&self, indicator: &Indicator) -> Result<Vec<&'a DataSource>, GenerationError> {
        let mut seen = HashSet::new();
        let mut sources = Vec::new();
        for source in indicator.metric.sources() {
            let Some(name) = source.data_source.as_deref() else {
                continue;
            };
            if seen.insert(name.to_string()) {
                sources.push(find(&self.spec.data_sources, name, |data| &data.name, "data source")?);
            }
        }
        Ok(sources)
    }

    /// Resolves a service by name.
    fn service(&self, name: &str) -> Result<&'a Service, GenerationError> {
        find(&self.spec.services, name, |service| &service.name, "service")
    }
}

// ============================================================================
// SECTION: Document Builders
// ============================================================================

/// Builds a top-level OpenSLO document of the given kind.
fn kind_document(kind: &str, name: &str, display_name: Option<&str>, spec: Document) -> Value {
    let mut document = Document::new();
    document.insert("apiVersion".to_string(), Value::from(OPENSLO_API_VERSION));
    document.insert("kind".to_string(), Value::from(kind));
    document.insert("metadata".to_string(), metadata(name, display_name));
    document.insert("spec".to_string(), Value::Object(spec));
    Value::Object(document)
}

/// Builds the indicator body: metadata and spec without a header.
fn indicator_document(indicator: &Indicator) -> Value {
    let mut spec = Document::new();
    insert_optional(&mut spec, "description", indicator.description.as_deref());
    match &indicator.metric {
        Metric::Threshold(threshold) => {
            let mut body = Document::new();
            body.insert("metricSource".to_string(), metric_source(&threshold.metric_source));
            spec.insert("thresholdMetric".to_string(), Value::Object(body));
        }
        Metric::Ratio(ratio) => {
            let mut body = Document::new();
            body.insert("counter".to_string(), Value::Bool(ratio.counter));
            match &ratio.shape {
                RatioShape::GoodTotal {
                    good,
                    total,
                } => {
                    body.insert("good".to_string(), wrapped_source(good));
                    body.insert("total".to_string(), wrapped_source(total));
                }
                RatioShape::BadTotal {
                    bad,
                    total,
                } => {
                    body.insert("bad".to_string(), wrapped_source(bad));
                    body.insert("total".to_string(), wrapped_source(total));
                }
                RatioShape::Raw {
                    raw_type,
                    raw,
                } => {
                    insert_optional(&mut body, "rawType", raw_type.as_deref());
                    body.insert("raw".to_string(), wrapped_source(raw));
                }
            }
            spec.insert("ratioMetric".to_string(), Value::Object(body));
        }
    }
    let mut document = Document::new();
    document.insert(
        "metadata".to_string(),
        metadata(&indicator.name, indicator.display_name.as_deref()),
    );
    document.insert("spec".to_string(), Value::Object(spec));
    Value::Object(document)
}

/// Wraps a metric source under a `metricSource` key.
fn wrapped_source(source: &MetricSource) -> Value {
    let mut document = Document::new();
    document.insert("metricSource".to_string(), metric_source(source));
    Value::Object(document)
}

/// Builds a metric source map.
fn metric_source(source: &MetricSource) -> Value {
    let mut document = Document::new();
    insert_optional(&mut document, "metricSourceRef", source.data_source.as_deref());
    insert_optional(&mut document, "type", source.source_type.as_deref());
    insert_optional(&mut document, "spec", source.spec.clone());
    Value::Object(document)
}

/// Builds the time window map.
fn time_window(window: &TimeWindow) -> Value {
    let mut document = Document::new();
    document.insert("duration".to_string(), Value::from(window.duration.to_string()));
    if let Some(calendar) = &window.calendar {
        let mut calendar_map = Document::new();
        calendar_map.insert("startTime".to_string(), Value::from(calendar.start_time.as_str()));
        calendar_map.insert("timeZone".to_string(), Value::from(calendar.time_zone.as_str()));
        document.insert("calendar".to_string(), Value::Object(calendar_map));
    }
    document.insert("isRolling".to_string(), Value::Bool(window.calendar.is_none()));
    Value::Object(document)
}

/// Builds one objective map.
fn objective_document(objective: &Objective, threshold: bool, budgeting_method: &str) -> Value {
    let mut document = Document::new();
    if threshold {
        insert_optional(&mut document, "op", objective.operator.as_deref());
        insert_optional(&mut document, "value", objective.value.map(|value| value.to_value()));
    }
    insert_optional(&mut document, "displayName", objective.display_name.as_deref());
    match objective.target {
        ObjectiveTarget::Fraction(target) => {
            document.insert("target".to_string(), Value::from(target));
        }
        ObjectiveTarget::Percent(target) => {
            document.insert("targetPercent".to_string(), Value::from(target));
        }
    }
    let window = objective.time_slice_window.as_ref().map(slice_window);
    if budgeting_method == TIMESLICES {
        insert_optional(
            &mut document,
            "timeSliceTarget",
            objective.time_slice_target.map(|value| value.to_value()),
        );
        insert_optional(&mut document, "timeSliceWindow", window);
    } else if budgeting_method == RATIO_TIMESLICES {
        insert_optional(&mut document, "timeSliceWindow", window);
    }
    Value::Object(document)
}

/// Renders a time slice window.
fn slice_window(window: &SliceWindow) -> Value {
    match window {
        SliceWindow::Duration(duration) => Value::from(duration.to_string()),
        SliceWindow::Numeric(number) => number.to_value(),
    }
}

/// Builds an alert policy document.
fn alert_policy_document(policy: &AlertPolicy) -> Value {
    let mut spec = Document::new();
    insert_optional(&mut spec, "description", policy.description.as_deref());
    spec.insert("alertWhenNoData".to_string(), Value::Bool(policy.alert_when_no_data));
    spec.insert("alertWhenResolved".to_string(), Value::Bool(policy.alert_when_resolved));
    spec.insert("alertWhenBreaching".to_string(), Value::Bool(policy.alert_when_breaching));
    let conditions = policy.conditions.iter().map(alert_condition).collect();
    spec.insert("conditions".to_string(), Value::Array(conditions));
    let targets = policy
        .notification_targets
        .iter()
        .map(|name| {
            let mut reference = Document::new();
            reference.insert("targetRef".to_string(), Value::from(name.as_str()));
            Value::Object(reference)
        })
        .collect();
    spec.insert("notificationTargets".to_string(), Value::Array(targets));
    kind_document("AlertPolicy", &policy.name, policy.display_name.as_deref(), spec)
}

/// Builds an inline alert condition.
fn alert_condition(alert: &AlertCondition) -> Value {
    let condition = &alert.condition;
    let mut condition_map = Document::new();
    condition_map.insert("kind".to_string(), Value::from(condition.kind.as_str()));
    condition_map.insert("op".to_string(), Value::from(condition.operator.as_str()));
    condition_map.insert("threshold".to_string(), condition.threshold.to_value());
    condition_map
        .insert("lookbackWindow".to_string(), Value::from(condition.lookback_window.to_string()));
    condition_map.insert("alertAfter".to_string(), Value::from(condition.alert_after.to_string()));

    let mut spec = Document::new();
    insert_optional(&mut spec, "description", alert.description.as_deref());
    spec.insert("severity".to_string(), Value::from(alert.severity.as_str()));
    spec.insert("condition".to_string(), Value::Object(condition_map));

    let mut document = Document::new();
    document.insert("kind".to_string(), Value::from("AlertCondition"));
    document.insert("metadata".to_string(), metadata(&alert.name, alert.display_name.as_deref()));
    document.insert("spec".to_string(), Value::Object(spec));
    Value::Object(document)
}

/// Builds a notification target document.
fn notification_target_document(target: &NotificationTarget) -> Value {
    let mut spec = Document::new();
    spec.insert("target".to_string(), Value::from(target.target.as_str()));
    insert_optional(&mut spec, "description", target.description.as_deref());
    kind_document("AlertNotificationTarget", &target.name, target.display_name.as_deref(), spec)
}

/// Builds a service document.
fn service_document(service: &Service) -> Value {
    let mut spec = Document::new();
    insert_optional(&mut spec, "description", service.description.as_deref());
    kind_document("Service", &service.name, service.display_name.as_deref(), spec)
}

/// Builds a data source document.
fn data_source_document(data_source: &DataSource) -> Value {
    let mut spec = Document::new();
    insert_optional(&mut spec, "description", data_source.description.as_deref());
    spec.insert("type".to_string(), Value::from(data_source.source_type.as_str()));
    let mut connection = Document::new();
    connection.insert("url".to_string(), Value::from(data_source.url.as_str()));
    spec.insert("connectionDetails".to_string(), Value::Object(connection));
    kind_document("DataSource", &data_source.name, data_source.display_name.as_deref(), spec)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Finds a declaration by name.
fn find<'s, T>(
    items: &'s [T],
    name: &str,
    name_of: impl Fn(&T) -> &String,
    kind: &'static str,
) -> Result<&'s T, GenerationError> {
    items.iter().find(|item| name_of(item) == name).ok_or_else(|| {
        GenerationError::UnresolvedReference {
            kind,
            name: name.to_string(),
        }
    })
}
