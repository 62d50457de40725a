// crates/contractgen-core/src/lib.rs
// ============================================================================
// Module: contractgen Core Library
// Description: Contract AST and normalized generator model.
// Purpose: Provide the deterministic model consumed by document renderers.
// Dependencies: serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! The core crate owns two things: the typed input tree handed over by the
//! external parser ([`ast`]) and the normalized model built from it
//! ([`model`]). The model is built per run through an explicit registry; no
//! state survives between runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod ast;
pub mod model;

// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Errors raised while building the generator model.
///
/// # Invariants
/// - Variants carry the offending name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A payload or declaration referenced a type that was never declared.
    #[error("unresolved type reference: {0}")]
    UnresolvedType(String),
    /// Two declarations share a name.
    #[error("duplicate type declaration: {0}")]
    DuplicateType(String),
    /// A type name was blank.
    #[error("type name must not be empty")]
    EmptyName,
    /// A handle was not issued by the registry it was used with.
    #[error("unknown type handle: {0}")]
    UnknownTypeId(usize),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use ast::ServiceSpecification;
pub use model::GeneratorModel;
pub use model::build_model;
pub use model::cardinality::Cardinality;
pub use model::cardinality::resolve_cardinality;
pub use model::endpoint::EndpointContract;
pub use model::endpoint::EndpointModelBuilder;
pub use model::endpoint::Operation;
pub use model::endpoint::OperationParameter;
pub use model::registry::DataType;
pub use model::registry::DataTypeField;
pub use model::registry::FieldType;
pub use model::registry::TypeId;
pub use model::registry::TypeRegistry;
pub use model::type_graph::TypeGraphBuilder;
