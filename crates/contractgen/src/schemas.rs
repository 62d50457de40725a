// crates/contractgen/src/schemas.rs
// ============================================================================
// Module: Contract Structural Schema
// Description: Embedded JSON Schema for rendered OpenAPI 3.0 documents.
// Purpose: Check serialized primary documents before they are written.
// Dependencies: jsonschema, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! The embedded schema covers the subset of OpenAPI 3.0 the renderer emits:
//! the version marker, `info` (including the extension keys), tags, path
//! items with their operations, and component schemas. Validation re-parses
//! the serialized text, so serializer regressions surface as messages too.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;

use crate::GenerationError;

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Returns the structural schema of a primary contract document.
#[must_use]
pub fn contract_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["openapi", "info", "paths"],
        "properties": {
            "openapi": { "type": "string", "pattern": "^3\\.0\\.\\d+$" },
            "info": {
                "type": "object",
                "required": ["title", "version"],
                "properties": {
                    "title": { "type": "string", "minLength": 1 },
                    "description": { "type": "string" },
                    "version": { "type": "string", "minLength": 1 },
                    "x-external-sla-file": {
                        "type": "object",
                        "required": ["$ref"],
                        "properties": { "$ref": { "type": "string", "minLength": 1 } },
                        "additionalProperties": false
                    },
                    "x-openslo": {
                        "type": "array",
                        "items": { "type": "string", "minLength": 1 },
                        "uniqueItems": true
                    }
                },
                "patternProperties": { "^x-": true },
                "additionalProperties": false
            },
            "tags": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "description": { "type": "string" }
                    },
                    "additionalProperties": false
                }
            },
            "paths": {
                "type": "object",
                "propertyNames": { "pattern": "^/" },
                "additionalProperties": { "$ref": "#/$defs/pathItem" }
            },
            "components": {
                "type": "object",
                "properties": {
                    "schemas": {
                        "type": "object",
                        "propertyNames": { "pattern": "^[A-Za-z0-9._-]+$" },
                        "additionalProperties": { "$ref": "#/$defs/schema" }
                    }
                }
            }
        },
        "patternProperties": { "^x-": true },
        "additionalProperties": false,
        "$defs": {
            "pathItem": {
                "type": "object",
                "propertyNames": { "enum": ["get", "put", "post", "patch", "delete"] },
                "additionalProperties": { "$ref": "#/$defs/operation" }
            },
            "operation": {
                "type": "object",
                "required": ["responses"],
                "properties": {
                    "tags": { "type": "array", "items": { "type": "string" } },
                    "summary": { "type": "string" },
                    "operationId": { "type": "string", "minLength": 1 },
                    "requestBody": {
                        "type": "object",
                        "required": ["content"],
                        "properties": {
                            "required": { "type": "boolean" },
                            "content": { "$ref": "#/$defs/content" }
                        }
                    },
                    "responses": {
                        "type": "object",
                        "minProperties": 1,
                        "additionalProperties": {
                            "type": "object",
                            "required": ["description"],
                            "properties": {
                                "description": { "type": "string" },
                                "content": { "$ref": "#/$defs/content" }
                            }
                        }
                    }
                }
            },
            "content": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "properties": { "schema": { "$ref": "#/$defs/schema" } }
                }
            },
            "schema": {
                "type": "object",
                "properties": {
                    "$ref": { "type": "string", "pattern": "^#/components/schemas/" },
                    "type": {
                        "enum": ["object", "array", "string", "integer", "number", "boolean"]
                    },
                    "format": { "type": "string" },
                    "nullable": { "type": "boolean" },
                    "items": { "$ref": "#/$defs/schema" },
                    "allOf": { "type": "array", "items": { "$ref": "#/$defs/schema" } },
                    "properties": {
                        "type": "object",
                        "additionalProperties": { "$ref": "#/$defs/schema" }
                    },
                    "required": {
                        "type": "array",
                        "items": { "type": "string" },
                        "uniqueItems": true
                    }
                },
                "dependentRequired": { "items": ["type"] }
            }
        }
    })
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Compiles the structural schema.
///
/// # Errors
///
/// Returns [`GenerationError::Generation`] when the schema does not compile.
pub fn compile_contract_schema() -> Result<Validator, GenerationError> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&contract_schema())
        .map_err(|err| GenerationError::Generation(format!("invalid contract schema: {err}")))
}

/// Validates serialized primary-document text and returns every violation.
///
/// An empty list means the document is structurally sound.
///
/// # Errors
///
/// Returns [`GenerationError::Serialization`] when the text does not parse
/// and [`GenerationError::Generation`] when the schema does not compile.
pub fn validate_contract_text(text: &str) -> Result<Vec<String>, GenerationError> {
    let document: Value = serde_yaml::from_str(text)
        .map_err(|err| GenerationError::Serialization(format!("contract reparse failed: {err}")))?;
    let validator = compile_contract_schema()?;
    Ok(validator
        .iter_errors(&document)
        .map(|error| error.to_string())
        .collect())
}

#[cfg(test)]
mod tests;
