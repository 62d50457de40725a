// crates/contractgen-core/src/model/endpoint.rs
// ============================================================================
// Module: Endpoint Model Builder
// Description: Converts endpoint and operation declarations into descriptors.
// Purpose: Resolve request/response types and synthesize missing payloads.
// Dependencies: crate::ast, crate::model::{cardinality, registry, type_graph}
// ============================================================================

//! ## Overview
//! Each operation receives exactly one request parameter named `input` and one
//! response type. Payloads that reference a declared type resolve through the
//! registry and are wrapped per the reference's cardinality; inline payloads
//! synthesize a named type first. Missing payloads use fixed substitutes: an
//! empty `<Operation>RequestMessage` and the shared `VoidResponse`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::ModelError;
use crate::ast::EndpointDecl;
use crate::ast::HttpMethod;
use crate::ast::MessageDecl;
use crate::ast::OperationDecl;
use crate::model::cardinality::resolve_cardinality;
use crate::model::registry::TypeId;
use crate::model::type_graph::TypeGraphBuilder;
use crate::model::type_graph::capitalize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name of the request parameter carried by every operation.
pub const INPUT_PARAMETER_NAME: &str = "input";
/// Name of the shared type used by operations without a response.
pub const VOID_RESPONSE_NAME: &str = "VoidResponse";
/// Suffix of synthesized inline request types.
const REQUEST_DATA_TYPE_SUFFIX: &str = "RequestDataType";
/// Suffix of synthesized inline response types.
const RESPONSE_DATA_TYPE_SUFFIX: &str = "ResponseDataType";
/// Suffix of the empty request type used when no request is declared.
const REQUEST_MESSAGE_SUFFIX: &str = "RequestMessage";

// ============================================================================
// SECTION: Operation Model
// ============================================================================

/// Converted endpoint contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointContract {
    /// Endpoint name.
    pub name: String,
    /// Optional endpoint description.
    pub description: Option<String>,
    /// Operations in declaration order.
    pub operations: Vec<Operation>,
}

/// Converted operation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Operation name as declared.
    pub name: String,
    /// Optional operation description.
    pub description: Option<String>,
    /// HTTP method; `post` when not declared.
    pub http_method: HttpMethod,
    /// Request parameters (always one, named `input`).
    pub parameters: Vec<OperationParameter>,
    /// Response type.
    pub response: TypeId,
}

/// Named operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub data_type: TypeId,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Payload direction; selects synthesized names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Request payload.
    Request,
    /// Response payload.
    Response,
}

/// Converts endpoints while sharing one type graph.
#[derive(Debug)]
pub struct EndpointModelBuilder<'g, 'r> {
    /// Type graph writer for the run.
    graph: &'g mut TypeGraphBuilder<'r>,
}

impl<'g, 'r> EndpointModelBuilder<'g, 'r> {
    /// Creates a builder over the run's type graph.
    #[must_use]
    pub const fn new(graph: &'g mut TypeGraphBuilder<'r>) -> Self {
        Self {
            graph,
        }
    }

    /// Converts one endpoint declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when a payload references an undeclared type.
    pub fn convert(&mut self, endpoint: &EndpointDecl) -> Result<EndpointContract, ModelError> {
        let mut operations = Vec::with_capacity(endpoint.operations.len());
        for operation in &endpoint.operations {
            operations.push(self.convert_operation(operation)?);
        }
        debug!(endpoint = endpoint.name.as_str(), operations = operations.len(), "converted endpoint");
        Ok(EndpointContract {
            name: endpoint.name.clone(),
            description: endpoint.description.clone(),
            operations,
        })
    }

    /// Converts one operation declaration.
    fn convert_operation(&mut self, operation: &OperationDecl) -> Result<Operation, ModelError> {
        let request = match &operation.request {
            Some(message) => self.message_type(&operation.name, message, Direction::Request)?,
            None => self
                .graph
                .type_for(&format!("{}{REQUEST_MESSAGE_SUFFIX}", capitalize(&operation.name)))?,
        };
        let response = match &operation.response {
            Some(message) => self.message_type(&operation.name, message, Direction::Response)?,
            None => self.graph.type_for(VOID_RESPONSE_NAME)?,
        };
        Ok(Operation {
            name: operation.name.clone(),
            description: operation.description.clone(),
            http_method: operation.http_method.unwrap_or(HttpMethod::Post),
            parameters: vec![OperationParameter {
                name: INPUT_PARAMETER_NAME.to_string(),
                data_type: request,
            }],
            response,
        })
    }

    /// Resolves or synthesizes the type of a message payload, then wraps it.
    fn message_type(
        &mut self,
        operation: &str,
        message: &MessageDecl,
        direction: Direction,
    ) -> Result<TypeId, ModelError> {
        let payload = &message.payload;
        let base = if let Some(reference) = payload.type_reference() {
            self.graph.registry().resolve(&reference.target)?
        } else {
            let name = match direction {
                Direction::Request => format!("{operation}{REQUEST_DATA_TYPE_SUFFIX}"),
                Direction::Response => {
                    format!("{}{RESPONSE_DATA_TYPE_SUFFIX}", capitalize(operation))
                }
            };
            self.graph.synthesize(&name, payload)?
        };
        self.graph.wrap(base, resolve_cardinality(Some(payload)))
    }
}

#[cfg(test)]
mod tests;
