// crates/contractgen/src/schemas/tests.rs
// ============================================================================
// Module: Contract Structural Schema Unit Tests
// Description: Schema compilation and violation reporting.
// Purpose: Ensure well-formed documents pass and malformed ones are reported.
// Dependencies: contractgen
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions favor direct unwraps."
)]

use super::compile_contract_schema;
use super::validate_contract_text;

const VALID: &str = "\
openapi: 3.0.1
info:
  title: Shop
  version: '1.0'
  x-external-sla-file:
    $ref: ./shop-sla.yaml
  x-openslo:
  - shop-openslo-availability.yaml
tags:
- name: Orders
paths:
  /Orders/listOrders:
    get:
      tags:
      - Orders
      operationId: listOrders
      responses:
        '200':
          description: no content
components:
  schemas:
    VoidResponse:
      type: object
      properties: {}
";

#[test]
fn schema_compiles() {
    assert!(compile_contract_schema().is_ok());
}

#[test]
fn well_formed_document_has_no_messages() {
    assert!(validate_contract_text(VALID).unwrap().is_empty());
}

#[test]
fn missing_info_title_is_reported() {
    let text = VALID.replace("  title: Shop\n", "");
    let messages = validate_contract_text(&text).unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("title"));
}

#[test]
fn unknown_http_method_is_reported() {
    let text = VALID.replace("    get:\n", "    fetch:\n");
    assert!(!validate_contract_text(&text).unwrap().is_empty());
}

#[test]
fn unparsable_text_is_an_error() {
    assert!(validate_contract_text("openapi: [unclosed").is_err());
}
