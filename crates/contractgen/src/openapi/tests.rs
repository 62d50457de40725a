// crates/contractgen/src/openapi/tests.rs
// ============================================================================
// Module: Primary Contract Renderer Unit Tests
// Description: Paths, component schemas, and extension injection.
// Purpose: Ensure the document mirrors the model without duplication.
// Dependencies: contractgen, contractgen-core, contractgen-config, serde_json
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers favor direct unwraps."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use contractgen_config::OpenApiConfig;
use contractgen_core::ServiceSpecification;
use contractgen_core::ast::HttpMethod;
use contractgen_core::build_model;
use serde_json::Value;
use serde_json::json;

use super::ContractRenderer;
use super::attach_extensions;
use super::contract_file_name;
use crate::GenerationError;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn spec() -> ServiceSpecification {
    serde_json::from_value(json!({
        "name": "Shop",
        "description": "order intake",
        "data_types": [{
            "name": "Order",
            "structure": {
                "parameter_tree": {
                    "nodes": [
                        { "node": { "atomic": { "name": "id", "base_type": "long" } } },
                        { "node": { "atomic": { "name": "tags", "base_type": "string", "card": "zero_or_more" } } },
                        { "node": { "type_reference": { "name": "parent", "target": "Order", "card": "zero_or_one" } } }
                    ]
                }
            }
        }],
        "endpoints": [{
            "name": "Orders",
            "description": "order operations",
            "operations": [
                {
                    "name": "createOrder",
                    "http_method": "post",
                    "request": { "payload": { "single_parameter_node": { "type_reference": { "target": "Order" } } } },
                    "response": { "payload": { "single_parameter_node": { "type_reference": { "target": "Order" } } } }
                },
                { "name": "listOrders", "http_method": "get" }
            ]
        }]
    }))
    .unwrap()
}

fn render(spec: &ServiceSpecification) -> Value {
    let model = build_model(spec).unwrap();
    let config = OpenApiConfig::default();
    ContractRenderer::new(spec, &model, &config).render().unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn contract_file_name_appends_extension() {
    assert_eq!(contract_file_name("shop"), "shop.yaml");
}

#[test]
fn info_uses_spec_name_and_default_version() {
    let document = render(&spec());
    assert_eq!(document["openapi"], json!("3.0.1"));
    assert_eq!(
        document["info"],
        json!({ "title": "Shop", "description": "order intake", "version": "1.0" })
    );
    assert_eq!(document["tags"], json!([{ "name": "Orders", "description": "order operations" }]));
}

#[test]
fn operations_map_to_endpoint_paths() {
    let document = render(&spec());
    let create = &document["paths"]["/Orders/createOrder"]["post"];
    assert_eq!(create["operationId"], json!("createOrder"));
    assert_eq!(
        create["requestBody"]["content"]["application/json"]["schema"],
        json!({ "$ref": "#/components/schemas/Order" })
    );
    assert_eq!(
        create["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
        json!("#/components/schemas/Order")
    );

    let list = &document["paths"]["/Orders/listOrders"]["get"];
    assert!(list.get("requestBody").is_none());
    assert_eq!(list["responses"]["200"], json!({ "description": "no content" }));
}

#[test]
fn field_cardinality_shapes_property_schemas() {
    let document = render(&spec());
    let order = &document["components"]["schemas"]["Order"];
    assert_eq!(order["properties"]["id"], json!({ "type": "integer", "format": "int64" }));
    assert_eq!(order["properties"]["tags"], json!({ "type": "array", "items": { "type": "string" } }));
    assert_eq!(
        order["properties"]["parent"],
        json!({ "allOf": [{ "$ref": "#/components/schemas/Order" }], "nullable": true })
    );
    assert_eq!(order["required"], json!(["id", "tags"]));
}

#[test]
fn every_registered_type_has_one_schema() {
    let spec = spec();
    let model = build_model(&spec).unwrap();
    let document = render(&spec);
    let schemas = document["components"]["schemas"].as_object().unwrap();
    assert_eq!(schemas.len(), model.registry.len());
    let names: Vec<&String> = schemas.keys().collect();
    assert_eq!(names[0], "Order");
}

#[test]
fn extensions_are_written_into_info() {
    let mut document = render(&spec());
    attach_extensions(
        &mut document,
        Some("shop-sla.yaml"),
        &[String::from("shop-openslo-availability.yaml")],
    );
    assert_eq!(document["info"]["x-external-sla-file"], json!({ "$ref": "./shop-sla.yaml" }));
    assert_eq!(document["info"]["x-openslo"], json!(["shop-openslo-availability.yaml"]));

    let mut bare = render(&spec());
    attach_extensions(&mut bare, None, &[]);
    assert!(bare["info"].get("x-external-sla-file").is_none());
    assert!(bare["info"].get("x-openslo").is_none());
}

#[test]
fn repeated_path_and_method_is_rejected() {
    let mut spec = spec();
    let list = spec.endpoints[0].operations[1].clone();
    let mut post_list = list.clone();
    post_list.http_method = Some(HttpMethod::Post);
    spec.endpoints[0].operations.push(post_list);
    let document = render(&spec);
    assert!(document["paths"]["/Orders/listOrders"]["get"].is_object());
    assert!(document["paths"]["/Orders/listOrders"]["post"].is_object());

    spec.endpoints[0].operations.push(list);
    let model = build_model(&spec).unwrap();
    let config = OpenApiConfig::default();
    let err = ContractRenderer::new(&spec, &model, &config).render().unwrap_err();
    assert_eq!(
        err,
        GenerationError::DuplicateOperation {
            method: String::from("get"),
            path: String::from("/Orders/listOrders"),
        }
    );
}
