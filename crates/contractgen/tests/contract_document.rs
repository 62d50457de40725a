// crates/contractgen/tests/contract_document.rs
// ============================================================================
// Module: Primary Contract Tests
// Description: End-to-end rendering of the primary contract document.
// Purpose: Ensure wrapper reuse, substitutes, and auxiliary links survive serialization.
// Dependencies: contractgen, serde_yaml, serde_json
// ============================================================================

//! ## Overview
//! Runs the generator over the shared shop fixture and inspects the
//! serialized `shop.yaml` document.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only document checks use panic-based assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use contractgen::Generator;
use contractgen::input::parse_yaml;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const SHOP_YAML: &str = include_str!("fixtures/shop.yaml");

fn contract() -> Result<(Value, Vec<String>), Box<dyn std::error::Error>> {
    let spec = parse_yaml(SHOP_YAML)?;
    let bundle = Generator::default().build(&spec, "shop")?;
    let text = bundle.text("shop.yaml").ok_or("missing shop.yaml")?;
    Ok((serde_yaml::from_str(text)?, bundle.validator_messages))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn contract_passes_structural_validation() -> Result<(), Box<dyn std::error::Error>> {
    let (_, messages) = contract()?;
    assert!(messages.is_empty(), "validator messages: {}", messages.join("; "));
    Ok(())
}

#[test]
fn info_links_auxiliary_documents() -> Result<(), Box<dyn std::error::Error>> {
    let (document, _) = contract()?;
    let info = &document["info"];
    assert_eq!(info["title"], json!("Shop"));
    assert_eq!(info["version"], json!("2.1"));
    assert_eq!(info["x-external-sla-file"], json!({ "$ref": "./shop-sla.yaml" }));
    assert_eq!(info["x-openslo"], json!(["shop-openslo-availability.yaml"]));
    Ok(())
}

#[test]
fn list_responses_share_one_wrapper_schema() -> Result<(), Box<dyn std::error::Error>> {
    let (document, _) = contract()?;
    let schemas = document["components"]["schemas"].as_object().ok_or("missing schemas")?;
    let wrappers = schemas.keys().filter(|name| name.as_str() == "OrderList").count();
    assert_eq!(wrappers, 1);
    assert_eq!(
        schemas["OrderList"]["properties"]["entries"],
        json!({ "type": "array", "items": { "$ref": "#/components/schemas/Order" } })
    );

    let list_ref = "#/components/schemas/OrderList";
    let paths = &document["paths"];
    for (path, method) in [("/Orders/listOrders", "get"), ("/Orders/searchOrders", "post")] {
        let schema = &paths[path][method]["responses"]["200"]["content"]["application/json"]["schema"];
        assert_eq!(schema["$ref"], json!(list_ref), "{path}");
    }
    Ok(())
}

#[test]
fn nested_lists_and_inline_requests_synthesize_types() -> Result<(), Box<dyn std::error::Error>> {
    let (document, _) = contract()?;
    let schemas = &document["components"]["schemas"];
    assert_eq!(
        schemas["Order"]["properties"]["lines"]["items"],
        json!({ "$ref": "#/components/schemas/OrderLines" })
    );
    assert_eq!(schemas["Order"]["required"], json!(["id", "lines"]));

    let request = &schemas["placeOrderRequestDataType"]["properties"];
    let names: Vec<&String> = request.as_object().ok_or("missing properties")?.keys().collect();
    assert_eq!(names, vec!["sku", "anonymous2"]);
    let body = &document["paths"]["/Orders/placeOrder"]["post"]["requestBody"];
    assert_eq!(
        body["content"]["application/json"]["schema"]["$ref"],
        json!("#/components/schemas/placeOrderRequestDataType")
    );
    Ok(())
}

#[test]
fn operations_without_payloads_use_substitutes() -> Result<(), Box<dyn std::error::Error>> {
    let (document, _) = contract()?;
    let ping = &document["paths"]["/Orders/ping"]["post"];
    assert!(ping.get("requestBody").is_none());
    assert_eq!(ping["responses"]["200"], json!({ "description": "no content" }));
    let schemas = &document["components"]["schemas"];
    assert!(schemas.get("PingRequestMessage").is_some());
    assert!(schemas.get("VoidResponse").is_some());
    Ok(())
}
