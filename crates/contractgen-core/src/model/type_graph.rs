// crates/contractgen-core/src/model/type_graph.rs
// ============================================================================
// Module: Type Graph Builder
// Description: Converts data type declarations and inline shapes into types.
// Purpose: Build a deduplicated, reference-safe type graph with wrappers.
// Dependencies: crate::ast, crate::model::{cardinality, registry}, tracing
// ============================================================================

//! ## Overview
//! [`TypeGraphBuilder`] is the only writer of the [`TypeRegistry`]. It offers
//! two idempotent primitives, [`TypeGraphBuilder::type_for`] and
//! [`TypeGraphBuilder::wrap`], plus the structural mapping that turns
//! parameter trees, atomic lists, and single nodes into fields.
//!
//! Wrapper types carry one level of cardinality each: `<Base>List` holds a
//! single list field `entries`, `<Base>Optional` a single nullable field
//! `value`. Wrappers are registered under their names, so asking twice
//! returns the same handle.
//!
//! Named declarations are registered before any of them is populated, which
//! lets declarations reference each other in any order. A reference to a name
//! that was never declared fails with [`ModelError::UnresolvedType`].
//!
//! Synthesized names (inline payloads and nested trees) remember the shape
//! that defined them. The same shape under the same name reuses the type; a
//! different shape, or a name already taken by a declaration, fails with
//! [`ModelError::DuplicateType`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use tracing::debug;
use tracing::trace;

use crate::ModelError;
use crate::ast::AtomicParameter;
use crate::ast::AtomicParameterList;
use crate::ast::DataTypeDecl;
use crate::ast::ElementStructure;
use crate::ast::ParameterTree;
use crate::ast::PrimitiveType;
use crate::ast::SingleParameterNode;
use crate::ast::TreeNode;
use crate::model::cardinality::Cardinality;
use crate::model::registry::DataTypeField;
use crate::model::registry::FieldType;
use crate::model::registry::TypeId;
use crate::model::registry::TypeRegistry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name suffix of list wrapper types.
pub const LIST_SUFFIX: &str = "List";
/// Name suffix of optional wrapper types.
pub const OPTIONAL_SUFFIX: &str = "Optional";
/// Field name of the list wrapper's single field.
pub const LIST_FIELD_NAME: &str = "entries";
/// Field name of the optional wrapper's single field.
pub const OPTIONAL_FIELD_NAME: &str = "value";
/// Prefix of positional names given to unnamed parameters.
const ANONYMOUS_PREFIX: &str = "anonymous";

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Where a structure's own cardinality marker is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelCardinality {
    /// A single top-level node applies its marker to the generated field.
    OnField,
    /// The caller expresses the marker through a wrapper type instead.
    OnWrapper,
}

/// Inline shape that defined a synthesized type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SynthesizedShape {
    /// Top-level payload structure.
    Structure(ElementStructure),
    /// Nested parameter tree.
    Tree(ParameterTree),
    /// Nested atomic parameter list.
    List(AtomicParameterList),
}

/// Outcome of claiming a synthesized name.
enum Claim {
    /// The name is new and the caller populates it.
    Fresh(TypeId),
    /// The same shape already defined the name.
    Reused(TypeId),
}

/// Writer of the type graph for one run.
#[derive(Debug)]
pub struct TypeGraphBuilder<'a> {
    /// Registry owned by the generation run.
    registry: &'a mut TypeRegistry,
    /// Shapes that defined each synthesized name.
    synthesized: BTreeMap<String, SynthesizedShape>,
}

impl<'a> TypeGraphBuilder<'a> {
    /// Creates a builder over a run's registry.
    #[must_use]
    pub const fn new(registry: &'a mut TypeRegistry) -> Self {
        Self {
            registry,
            synthesized: BTreeMap::new(),
        }
    }

    /// Returns read access to the registry.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        self.registry
    }

    /// Returns the type registered under `name`, creating an empty one if the
    /// name is new.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] for blank names.
    pub fn type_for(&mut self, name: &str) -> Result<TypeId, ModelError> {
        if let Some(existing) = self.registry.lookup(name) {
            trace!(name, "reusing registered type");
            return Ok(existing);
        }
        let id = self.registry.insert(name)?;
        debug!(name, "registered type");
        Ok(id)
    }

    /// Wraps a type per cardinality, creating the wrapper on first use.
    ///
    /// Scalar cardinality returns `base` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownTypeId`] when `base` is not registered here.
    pub fn wrap(&mut self, base: TypeId, cardinality: Cardinality) -> Result<TypeId, ModelError> {
        let (suffix, field_name) = match cardinality {
            Cardinality::Scalar => return Ok(base),
            Cardinality::List => (LIST_SUFFIX, LIST_FIELD_NAME),
            Cardinality::Optional => (OPTIONAL_SUFFIX, OPTIONAL_FIELD_NAME),
        };
        let wrapper_name = format!("{}{suffix}", self.registry.name_of(base)?);
        if let Some(existing) = self.registry.lookup(&wrapper_name) {
            trace!(name = wrapper_name.as_str(), "reusing wrapper type");
            return Ok(existing);
        }
        let wrapper = self.registry.insert(&wrapper_name)?;
        let mut field = DataTypeField::new(field_name, FieldType::Named(base));
        field.is_list = cardinality.is_list();
        field.is_nullable = cardinality.is_optional();
        self.registry.push_field(wrapper, field)?;
        debug!(name = wrapper_name.as_str(), "registered wrapper type");
        Ok(wrapper)
    }

    /// Registers and populates all named declarations.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] on duplicate names or unresolved references.
    pub fn declare_all(&mut self, declarations: &[DataTypeDecl]) -> Result<(), ModelError> {
        let mut declared = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            declared.push(self.registry.insert(&declaration.name)?);
        }
        for (id, declaration) in declared.into_iter().zip(declarations) {
            self.map_structure(id, &declaration.structure, TopLevelCardinality::OnField)?;
        }
        Ok(())
    }

    /// Returns the type named `name` populated from `structure`.
    ///
    /// Asking again with an identical structure returns the same handle.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateType`] when `name` is already defined by
    /// a declaration or by a different structure, and [`ModelError`] when the
    /// structure references unknown types.
    pub fn synthesize(
        &mut self,
        name: &str,
        structure: &ElementStructure,
    ) -> Result<TypeId, ModelError> {
        match self.claim(name, SynthesizedShape::Structure(structure.clone()))? {
            Claim::Fresh(id) => {
                self.map_structure(id, structure, TopLevelCardinality::OnWrapper)?;
                Ok(id)
            }
            Claim::Reused(id) => Ok(id),
        }
    }

    /// Registers `name` as defined by `shape`, or returns the type an equal
    /// shape already defined.
    fn claim(&mut self, name: &str, shape: SynthesizedShape) -> Result<Claim, ModelError> {
        match self.synthesized.get(name) {
            Some(existing) if *existing == shape => {
                trace!(name, "reusing synthesized type");
                return self.registry.resolve(name).map(Claim::Reused);
            }
            Some(_) => return Err(ModelError::DuplicateType(name.to_string())),
            None => {}
        }
        if self.registry.lookup(name).is_some() {
            return Err(ModelError::DuplicateType(name.to_string()));
        }
        let id = self.registry.insert(name)?;
        self.synthesized.insert(name.to_string(), shape);
        debug!(name, "registered synthesized type");
        Ok(Claim::Fresh(id))
    }

    /// Appends the fields described by `structure` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when the structure references unknown types.
    pub fn map_structure(
        &mut self,
        target: TypeId,
        structure: &ElementStructure,
        top_level: TopLevelCardinality,
    ) -> Result<(), ModelError> {
        let mut positions = 0_usize;
        match structure {
            ElementStructure::ParameterTree(tree) => self.map_tree_nodes(target, tree),
            ElementStructure::AtomicParameterList(list) => {
                for atom in &list.atoms {
                    let field = atomic_field(atom, &mut positions);
                    self.registry.push_field(target, field)?;
                }
                Ok(())
            }
            ElementStructure::SingleParameterNode(node) => {
                let mut field = self.single_node_field(node, &mut positions)?;
                if top_level == TopLevelCardinality::OnWrapper {
                    field.is_list = false;
                    field.is_nullable = false;
                }
                self.registry.push_field(target, field)
            }
        }
    }

    /// Maps every child of a tree to one field of `target`.
    fn map_tree_nodes(&mut self, target: TypeId, tree: &ParameterTree) -> Result<(), ModelError> {
        let mut positions = 0_usize;
        for node in &tree.nodes {
            let field = match node {
                TreeNode::Node(single) => self.single_node_field(single, &mut positions)?,
                TreeNode::Tree(child) => self.nested_tree_field(target, child, &mut positions)?,
                TreeNode::List(list) => self.nested_list_field(target, list, &mut positions)?,
            };
            self.registry.push_field(target, field)?;
        }
        Ok(())
    }

    /// Builds the field for a single parameter node.
    fn single_node_field(
        &self,
        node: &SingleParameterNode,
        positions: &mut usize,
    ) -> Result<DataTypeField, ModelError> {
        let field = match node {
            SingleParameterNode::Atomic(atom) => atomic_field(atom, positions),
            SingleParameterNode::TypeReference(reference) => {
                let referenced = self.registry.resolve(&reference.target)?;
                let name = field_name(reference.name.as_deref(), positions);
                with_cardinality(
                    DataTypeField::new(name, FieldType::Named(referenced)),
                    Cardinality::from_marker(reference.card),
                )
            }
            SingleParameterNode::Generic(generic) => {
                let name = field_name(generic.name.as_deref(), positions);
                with_cardinality(
                    DataTypeField::new(name, FieldType::Primitive(PrimitiveType::Raw)),
                    Cardinality::from_marker(generic.card),
                )
            }
        };
        Ok(field)
    }

    /// Synthesizes a nested type for a child tree and returns the field
    /// pointing at it.
    fn nested_tree_field(
        &mut self,
        parent: TypeId,
        tree: &ParameterTree,
        positions: &mut usize,
    ) -> Result<DataTypeField, ModelError> {
        let name = field_name(tree.name.as_deref(), positions);
        let nested_name = self.nested_name(parent, &name)?;
        let nested = match self.claim(&nested_name, SynthesizedShape::Tree(tree.clone()))? {
            Claim::Fresh(id) => {
                self.map_tree_nodes(id, tree)?;
                id
            }
            Claim::Reused(id) => id,
        };
        Ok(with_cardinality(
            DataTypeField::new(name, FieldType::Named(nested)),
            Cardinality::from_marker(tree.card),
        ))
    }

    /// Synthesizes a nested type for a child atomic list and returns the field
    /// pointing at it.
    fn nested_list_field(
        &mut self,
        parent: TypeId,
        list: &AtomicParameterList,
        positions: &mut usize,
    ) -> Result<DataTypeField, ModelError> {
        let name = field_name(list.name.as_deref(), positions);
        let nested_name = self.nested_name(parent, &name)?;
        let nested = match self.claim(&nested_name, SynthesizedShape::List(list.clone()))? {
            Claim::Fresh(id) => {
                let mut nested_positions = 0_usize;
                for atom in &list.atoms {
                    let field = atomic_field(atom, &mut nested_positions);
                    self.registry.push_field(id, field)?;
                }
                id
            }
            Claim::Reused(id) => id,
        };
        Ok(with_cardinality(
            DataTypeField::new(name, FieldType::Named(nested)),
            Cardinality::from_marker(list.card),
        ))
    }

    /// Returns the nested type name `<Parent><Child>` for a child structure.
    fn nested_name(&self, parent: TypeId, child: &str) -> Result<String, ModelError> {
        Ok(format!("{}{}", self.registry.name_of(parent)?, capitalize(child)))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the field for an atomic parameter.
fn atomic_field(atom: &AtomicParameter, positions: &mut usize) -> DataTypeField {
    let name = field_name(atom.name.as_deref(), positions);
    with_cardinality(
        DataTypeField::new(name, FieldType::Primitive(atom.base_type)),
        Cardinality::from_marker(atom.card),
    )
}

/// Applies cardinality flags to a field.
const fn with_cardinality(mut field: DataTypeField, cardinality: Cardinality) -> DataTypeField {
    field.is_list = cardinality.is_list();
    field.is_nullable = cardinality.is_optional();
    field
}

/// Returns the declared name or the next positional placeholder.
fn field_name(name: Option<&str>, positions: &mut usize) -> String {
    *positions += 1;
    match name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("{ANONYMOUS_PREFIX}{positions}"),
    }
}

/// Upper-cases the first character of `name`.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
