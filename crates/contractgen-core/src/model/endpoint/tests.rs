// crates/contractgen-core/src/model/endpoint/tests.rs
// ============================================================================
// Module: Endpoint Model Builder Unit Tests
// Description: Request/response resolution and substitute types.
// Purpose: Ensure naming rules and shared substitutes hold per run.
// Dependencies: contractgen-core
// ============================================================================

//! ## Overview
//! Covers synthesized request/response names, the empty request message, the
//! shared void response, and the default HTTP method.

#![allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions favor direct unwraps for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::EndpointModelBuilder;
use super::INPUT_PARAMETER_NAME;
use crate::ast::AtomicParameter;
use crate::ast::ElementStructure;
use crate::ast::EndpointDecl;
use crate::ast::HttpMethod;
use crate::ast::MessageDecl;
use crate::ast::OperationDecl;
use crate::ast::PrimitiveType;
use crate::ast::SingleParameterNode;
use crate::model::registry::TypeRegistry;
use crate::model::type_graph::TypeGraphBuilder;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn string_message() -> MessageDecl {
    MessageDecl {
        payload: ElementStructure::SingleParameterNode(SingleParameterNode::Atomic(
            AtomicParameter {
                name: Some(String::from("text")),
                base_type: PrimitiveType::String,
                card: None,
            },
        )),
    }
}

fn operation(name: &str, request: Option<MessageDecl>, response: Option<MessageDecl>) -> OperationDecl {
    OperationDecl {
        name: name.to_string(),
        description: None,
        http_method: None,
        request,
        response,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn inline_payloads_use_direction_specific_names() {
    let endpoint = EndpointDecl {
        name: String::from("Echo"),
        description: None,
        operations: vec![operation("echoText", Some(string_message()), Some(string_message()))],
    };
    let mut registry = TypeRegistry::new();
    let mut graph = TypeGraphBuilder::new(&mut registry);
    let contract = EndpointModelBuilder::new(&mut graph).convert(&endpoint).unwrap();
    let op = &contract.operations[0];
    assert_eq!(op.http_method, HttpMethod::Post);
    assert_eq!(op.parameters.len(), 1);
    assert_eq!(op.parameters[0].name, INPUT_PARAMETER_NAME);
    assert_eq!(registry.name_of(op.parameters[0].data_type).unwrap(), "echoTextRequestDataType");
    assert_eq!(registry.name_of(op.response).unwrap(), "EchoTextResponseDataType");
}

#[test]
fn missing_payloads_use_substitutes() {
    let endpoint = EndpointDecl {
        name: String::from("Admin"),
        description: Some(String::from("Administration")),
        operations: vec![operation("reset", None, None), operation("purge", None, None)],
    };
    let mut registry = TypeRegistry::new();
    let mut graph = TypeGraphBuilder::new(&mut registry);
    let contract = EndpointModelBuilder::new(&mut graph).convert(&endpoint).unwrap();
    let reset = &contract.operations[0];
    let purge = &contract.operations[1];
    assert_eq!(reset.response, purge.response);
    assert_eq!(registry.name_of(reset.response).unwrap(), "VoidResponse");
    assert_eq!(registry.name_of(reset.parameters[0].data_type).unwrap(), "ResetRequestMessage");
    assert_eq!(registry.name_of(purge.parameters[0].data_type).unwrap(), "PurgeRequestMessage");
    assert!(registry.data_type(reset.parameters[0].data_type).unwrap().fields().is_empty());
    assert_eq!(contract.description.as_deref(), Some("Administration"));
}
