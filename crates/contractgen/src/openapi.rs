// crates/contractgen/src/openapi.rs
// ============================================================================
// Module: Primary Contract Renderer
// Description: Renders the normalized model as an OpenAPI 3.0 document.
// Purpose: Produce `<base>.yaml` and link the auxiliary documents to it.
// Dependencies: contractgen-core, contractgen-config, serde_json, tracing
// ============================================================================

//! ## Overview
//! The primary document is derived from the [`GeneratorModel`] alone: every
//! registered type becomes one entry under `components.schemas` in
//! registration order, and every operation becomes one path item at
//! `/<endpoint>/<operation>`.
//!
//! Auxiliary documents are linked after rendering through
//! [`attach_extensions`], which writes the SLA file reference and the list of
//! SLO bundle file names into `info`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use contractgen_config::OpenApiConfig;
use contractgen_core::GeneratorModel;
use contractgen_core::ServiceSpecification;
use contractgen_core::ast::PrimitiveType;
use contractgen_core::model::endpoint::EndpointContract;
use contractgen_core::model::endpoint::Operation;
use contractgen_core::model::endpoint::VOID_RESPONSE_NAME;
use contractgen_core::model::registry::DataType;
use contractgen_core::model::registry::DataTypeField;
use contractgen_core::model::registry::FieldType;
use contractgen_core::model::registry::TypeId;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tracing::debug;

use crate::GenerationError;
use crate::document::Document;
use crate::document::insert_optional;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// OpenAPI version written into the primary document.
pub const OPENAPI_VERSION: &str = "3.0.1";
/// Extension key holding the SLA document reference.
pub const SLA_EXTENSION_KEY: &str = "x-external-sla-file";
/// Extension key holding the SLO bundle file names.
pub const OPENSLO_EXTENSION_KEY: &str = "x-openslo";
/// Media type of request and response bodies.
const JSON_MEDIA_TYPE: &str = "application/json";
/// Prefix of component schema references.
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Returns the primary document file name for a base name.
#[must_use]
pub fn contract_file_name(base_name: &str) -> String {
    format!("{base_name}.yaml")
}

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Renders the primary contract document.
#[derive(Debug, Clone, Copy)]
pub struct ContractRenderer<'a> {
    /// Specification supplying the document title and version.
    spec: &'a ServiceSpecification,
    /// Model built from the specification.
    model: &'a GeneratorModel,
    /// OpenAPI settings.
    config: &'a OpenApiConfig,
}

impl<'a> ContractRenderer<'a> {
    /// Creates a renderer for one model.
    #[must_use]
    pub const fn new(
        spec: &'a ServiceSpecification,
        model: &'a GeneratorModel,
        config: &'a OpenApiConfig,
    ) -> Self {
        Self {
            spec,
            model,
            config,
        }
    }

    /// Renders the document.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Model`] when the model holds a foreign
    /// type handle.
    pub fn render(&self) -> Result<Value, GenerationError> {
        let mut document = Document::new();
        document.insert("openapi".to_string(), Value::from(OPENAPI_VERSION));
        document.insert("info".to_string(), self.info());
        let tags = self.model.endpoints.iter().map(tag).collect();
        document.insert("tags".to_string(), Value::Array(tags));
        document.insert("paths".to_string(), Value::Object(self.paths()?));

        let mut schemas = Map::new();
        for (_, data_type) in self.model.registry.iter() {
            schemas.insert(data_type.name().to_string(), self.schema(data_type)?);
        }
        debug!(schemas = schemas.len(), "rendered component schemas");
        document.insert("components".to_string(), json!({ "schemas": schemas }));
        Ok(Value::Object(document))
    }

    /// Builds the `info` object.
    fn info(&self) -> Value {
        let mut info = Document::new();
        info.insert("title".to_string(), Value::from(self.spec.name.as_str()));
        insert_optional(&mut info, "description", self.spec.description.as_deref());
        let version = self.spec.version.as_deref().unwrap_or(&self.config.default_version);
        info.insert("version".to_string(), Value::from(version));
        Value::Object(info)
    }

    /// Builds the `paths` object.
    ///
    /// Two operations mapping to the same path and method are an error.
    fn paths(&self) -> Result<Map<String, Value>, GenerationError> {
        let mut paths = Map::new();
        for endpoint in &self.model.endpoints {
            for operation in &endpoint.operations {
                let path = format!("/{}/{}", endpoint.name, operation.name);
                let method = operation.http_method.as_str();
                let item = paths.entry(path.clone()).or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(item) = item {
                    if item.contains_key(method) {
                        return Err(GenerationError::DuplicateOperation {
                            method: method.to_string(),
                            path,
                        });
                    }
                    item.insert(method.to_string(), self.operation(endpoint, operation)?);
                }
            }
        }
        Ok(paths)
    }

    /// Builds one operation object.
    fn operation(
        &self,
        endpoint: &EndpointContract,
        operation: &Operation,
    ) -> Result<Value, GenerationError> {
        let mut document = Document::new();
        document.insert("tags".to_string(), json!([endpoint.name]));
        insert_optional(&mut document, "summary", operation.description.as_deref());
        document.insert("operationId".to_string(), Value::from(operation.name.as_str()));

        if operation.http_method.has_body() {
            for parameter in &operation.parameters {
                let request = self.model.registry.data_type(parameter.data_type)?;
                if !request.fields().is_empty() {
                    document.insert(
                        "requestBody".to_string(),
                        json!({
                            "required": true,
                            "content": { JSON_MEDIA_TYPE: { "schema": schema_ref(request.name()) } },
                        }),
                    );
                }
            }
        }

        document.insert("responses".to_string(), json!({ "200": self.response(operation.response)? }));
        Ok(Value::Object(document))
    }

    /// Builds the success response for a response type.
    fn response(&self, response: TypeId) -> Result<Value, GenerationError> {
        let name = self.model.registry.name_of(response)?;
        if name == VOID_RESPONSE_NAME {
            return Ok(json!({ "description": "no content" }));
        }
        Ok(json!({
            "description": "successful operation",
            "content": { JSON_MEDIA_TYPE: { "schema": schema_ref(name) } },
        }))
    }

    /// Builds the component schema of a data type.
    fn schema(&self, data_type: &DataType) -> Result<Value, GenerationError> {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in data_type.fields() {
            properties.insert(field.name.clone(), self.field_schema(field)?);
            if !field.is_nullable {
                required.push(Value::from(field.name.as_str()));
            }
        }
        let mut schema = Document::new();
        schema.insert("type".to_string(), Value::from("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Ok(Value::Object(schema))
    }

    /// Builds the schema of one field.
    fn field_schema(&self, field: &DataTypeField) -> Result<Value, GenerationError> {
        let base = match field.field_type {
            FieldType::Primitive(primitive) => primitive_schema(primitive),
            FieldType::Named(id) => schema_ref(self.model.registry.name_of(id)?),
        };
        let mut schema = if field.is_list {
            json!({ "type": "array", "items": base })
        } else {
            base
        };
        if field.is_nullable {
            if schema.get("$ref").is_some() {
                schema = json!({ "allOf": [schema], "nullable": true });
            } else if let Value::Object(map) = &mut schema {
                map.insert("nullable".to_string(), Value::Bool(true));
            }
        }
        Ok(schema)
    }
}

// ============================================================================
// SECTION: Extensions
// ============================================================================

/// Writes the auxiliary document links into `info`.
///
/// The SLA reference is written only when `sla_file` is set and the bundle
/// list only when it is non-empty.
pub fn attach_extensions(document: &mut Value, sla_file: Option<&str>, bundle_files: &[String]) {
    let Some(info) = document.get_mut("info").and_then(Value::as_object_mut) else {
        return;
    };
    if let Some(sla_file) = sla_file {
        info.insert(SLA_EXTENSION_KEY.to_string(), json!({ "$ref": format!("./{sla_file}") }));
    }
    if !bundle_files.is_empty() {
        info.insert(OPENSLO_EXTENSION_KEY.to_string(), json!(bundle_files));
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a tag object for an endpoint.
fn tag(endpoint: &EndpointContract) -> Value {
    let mut tag = Document::new();
    tag.insert("name".to_string(), Value::from(endpoint.name.as_str()));
    insert_optional(&mut tag, "description", endpoint.description.as_deref());
    Value::Object(tag)
}

/// Builds a component schema reference.
fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("{SCHEMA_REF_PREFIX}{name}") })
}

/// Maps a primitive to its schema.
fn primitive_schema(primitive: PrimitiveType) -> Value {
    match primitive {
        PrimitiveType::Bool => json!({ "type": "boolean" }),
        PrimitiveType::Int => json!({ "type": "integer", "format": "int32" }),
        PrimitiveType::Long => json!({ "type": "integer", "format": "int64" }),
        PrimitiveType::Double => json!({ "type": "number", "format": "double" }),
        PrimitiveType::String => json!({ "type": "string" }),
        PrimitiveType::Raw => json!({ "type": "string", "format": "binary" }),
        PrimitiveType::Void => json!({}),
    }
}

#[cfg(test)]
mod tests;
