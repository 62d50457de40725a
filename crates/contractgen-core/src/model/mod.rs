// crates/contractgen-core/src/model/mod.rs
// ============================================================================
// Module: Generator Model
// Description: Normalized type graph and operation model for one run.
// Purpose: Turn a service specification into generator-facing structures.
// Dependencies: crate::ast, tracing
// ============================================================================

//! ## Overview
//! [`build_model`] is the single entry point: it creates the run's
//! [`TypeRegistry`], registers every named declaration before any endpoint is
//! converted, and returns a [`GeneratorModel`] that owns the registry and the
//! converted endpoints. Nothing here performs I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod cardinality;
pub mod endpoint;
pub mod registry;
pub mod type_graph;

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::ModelError;
use crate::ast::ServiceSpecification;
use crate::model::endpoint::EndpointContract;
use crate::model::endpoint::EndpointModelBuilder;
use crate::model::registry::TypeRegistry;
use crate::model::type_graph::TypeGraphBuilder;

// ============================================================================
// SECTION: Model
// ============================================================================

/// Normalized model produced by one generation run.
///
/// # Invariants
/// - Every [`registry::TypeId`] reachable from `endpoints` was issued by
///   `registry`.
#[derive(Debug, Clone)]
pub struct GeneratorModel {
    /// Type graph of the run.
    pub registry: TypeRegistry,
    /// Converted endpoints in declaration order.
    pub endpoints: Vec<EndpointContract>,
}

/// Builds the normalized model for a service specification.
///
/// # Errors
///
/// Returns [`ModelError`] on duplicate declarations or unresolved references.
pub fn build_model(spec: &ServiceSpecification) -> Result<GeneratorModel, ModelError> {
    let mut registry = TypeRegistry::new();
    let mut graph = TypeGraphBuilder::new(&mut registry);
    graph.declare_all(&spec.data_types)?;
    let mut endpoints = Vec::with_capacity(spec.endpoints.len());
    let mut builder = EndpointModelBuilder::new(&mut graph);
    for endpoint in &spec.endpoints {
        endpoints.push(builder.convert(endpoint)?);
    }
    debug!(types = registry.len(), endpoints = endpoints.len(), "built generator model");
    Ok(GeneratorModel {
        registry,
        endpoints,
    })
}
