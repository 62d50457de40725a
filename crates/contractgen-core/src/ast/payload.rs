// crates/contractgen-core/src/ast/payload.rs
// ============================================================================
// Module: Payload AST
// Description: Endpoint, operation, and payload structure nodes.
// Purpose: Describe request/response shapes as delivered by the parser.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Payloads are either a direct reference to a declared data type or an inline
//! structural description. The three structural variants (parameter tree,
//! atomic parameter list, single parameter node) are modeled as an enum so the
//! builders match on them exhaustively.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Primitive Markers
// ============================================================================

/// Cardinality marker attached to a structural node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardinalityMarker {
    /// Exactly one value (`!`).
    ExactlyOne,
    /// Zero or one value (`?`).
    ZeroOrOne,
    /// Zero or more values (`*`).
    ZeroOrMore,
    /// One or more values (`+`).
    AtLeastOne,
}

/// Primitive base types available to atomic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    /// Boolean flag.
    Bool,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// Double precision number.
    Double,
    /// Text.
    String,
    /// Opaque binary payload.
    Raw,
    /// No value.
    Void,
}

impl PrimitiveType {
    /// Returns the source keyword for the primitive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::String => "string",
            Self::Raw => "raw",
            Self::Void => "void",
        }
    }
}

// ============================================================================
// SECTION: Parameter Nodes
// ============================================================================

/// Named (or anonymous) parameter with a primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicParameter {
    /// Optional parameter name.
    #[serde(default)]
    pub name: Option<String>,
    /// Primitive base type.
    pub base_type: PrimitiveType,
    /// Optional cardinality marker.
    #[serde(default)]
    pub card: Option<CardinalityMarker>,
}

/// Reference to a declared data type by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeReference {
    /// Optional parameter name carrying the reference.
    #[serde(default)]
    pub name: Option<String>,
    /// Name of the referenced data type declaration.
    pub target: String,
    /// Optional cardinality marker.
    #[serde(default)]
    pub card: Option<CardinalityMarker>,
}

/// Untyped placeholder parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParameter {
    /// Optional parameter name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional cardinality marker.
    #[serde(default)]
    pub card: Option<CardinalityMarker>,
}

/// A single parameter node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleParameterNode {
    /// Primitive parameter.
    Atomic(AtomicParameter),
    /// Reference to a declared data type.
    TypeReference(TypeReference),
    /// Untyped parameter.
    Generic(GenericParameter),
}

impl SingleParameterNode {
    /// Returns the parameter name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Atomic(atom) => atom.name.as_deref(),
            Self::TypeReference(reference) => reference.name.as_deref(),
            Self::Generic(generic) => generic.name.as_deref(),
        }
    }

    /// Returns the node's cardinality marker, if any.
    #[must_use]
    pub const fn card(&self) -> Option<CardinalityMarker> {
        match self {
            Self::Atomic(atom) => atom.card,
            Self::TypeReference(reference) => reference.card,
            Self::Generic(generic) => generic.card,
        }
    }
}

/// Flat list of atomic parameters sharing one cardinality marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicParameterList {
    /// Optional list name.
    #[serde(default)]
    pub name: Option<String>,
    /// Atoms in declaration order.
    pub atoms: Vec<AtomicParameter>,
    /// Optional cardinality marker for the whole list.
    #[serde(default)]
    pub card: Option<CardinalityMarker>,
}

/// Nested, named parameter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterTree {
    /// Optional tree name.
    #[serde(default)]
    pub name: Option<String>,
    /// Child nodes in declaration order.
    pub nodes: Vec<TreeNode>,
    /// Optional cardinality marker for the whole tree.
    #[serde(default)]
    pub card: Option<CardinalityMarker>,
}

/// Child of a parameter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Single parameter.
    Node(SingleParameterNode),
    /// Nested tree.
    Tree(ParameterTree),
    /// Nested atomic parameter list.
    List(AtomicParameterList),
}

/// Structural description of a payload or data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementStructure {
    /// Nested parameter tree.
    ParameterTree(ParameterTree),
    /// Flat atomic parameter list.
    AtomicParameterList(AtomicParameterList),
    /// Single parameter node.
    SingleParameterNode(SingleParameterNode),
}

impl ElementStructure {
    /// Returns the direct type reference when the structure is nothing more
    /// than a reference to a declared data type.
    #[must_use]
    pub const fn type_reference(&self) -> Option<&TypeReference> {
        match self {
            Self::SingleParameterNode(SingleParameterNode::TypeReference(reference)) => {
                Some(reference)
            }
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Declarations
// ============================================================================

/// Named data type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeDecl {
    /// Declared type name.
    pub name: String,
    /// Declared structure.
    pub structure: ElementStructure,
}

/// HTTP method bound to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpMethod {
    /// `GET`.
    Get,
    /// `PUT`.
    Put,
    /// `POST`.
    Post,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
}

impl HttpMethod {
    /// Returns the lowercase method key used in contract documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Returns true when the method carries a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Put | Self::Post | Self::Patch)
    }
}

/// Request or response message of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDecl {
    /// Message payload.
    pub payload: ElementStructure,
}

/// Operation declaration inside an endpoint contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDecl {
    /// Operation name.
    pub name: String,
    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional HTTP method binding.
    #[serde(default)]
    pub http_method: Option<HttpMethod>,
    /// Optional request message.
    #[serde(default)]
    pub request: Option<MessageDecl>,
    /// Optional response message.
    #[serde(default)]
    pub response: Option<MessageDecl>,
}

/// Endpoint contract declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDecl {
    /// Endpoint name.
    pub name: String,
    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Operations in declaration order.
    #[serde(default)]
    pub operations: Vec<OperationDecl>,
}
