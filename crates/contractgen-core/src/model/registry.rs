// crates/contractgen-core/src/model/registry.rs
// ============================================================================
// Module: Type Registry
// Description: Name-keyed arena of generator data types for one run.
// Purpose: Guarantee at most one data type per logical name.
// Dependencies: crate::ast, crate::ModelError
// ============================================================================

//! ## Overview
//! The registry owns every [`DataType`] created during one generation run and
//! hands out [`TypeId`] handles. A handle is the identity of a type: two
//! lookups of the same name return the same handle for the lifetime of the
//! registry. Fields point at other types through handles, so a type may be
//! shared by any number of fields without ownership cycles.
//!
//! The registry is created by the top-level generation call, threaded through
//! the builders by mutable reference, and dropped when the run ends. There is
//! no process-wide instance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use crate::ModelError;
use crate::ast::PrimitiveType;

// ============================================================================
// SECTION: Handles
// ============================================================================

/// Stable handle of a registered data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    /// Returns the registration index of the type.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// SECTION: Data Types
// ============================================================================

/// Type of a data type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Primitive value.
    Primitive(PrimitiveType),
    /// Reference to a registered data type (non-owning).
    Named(TypeId),
}

/// Field of a generator data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypeField {
    /// Field name.
    pub name: String,
    /// Field type.
    pub field_type: FieldType,
    /// True when the field holds a list.
    pub is_list: bool,
    /// True when the field may be absent.
    pub is_nullable: bool,
}

impl DataTypeField {
    /// Creates a scalar, non-nullable field.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            is_list: false,
            is_nullable: false,
        }
    }
}

/// Named generator data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    /// Unique type name.
    name: String,
    /// Fields in insertion order.
    fields: Vec<DataTypeField>,
}

impl DataType {
    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[DataTypeField] {
        &self.fields
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Arena of data types keyed by name.
///
/// # Invariants
/// - Names are unique; `index` and `types` always agree.
/// - A [`TypeId`] issued by this registry stays valid until it is dropped.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// Types in registration order.
    types: Vec<DataType>,
    /// Name to handle index.
    index: HashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle registered under `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.index.get(name).copied()
    }

    /// Returns the handle registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnresolvedType`] when no type carries the name.
    pub fn resolve(&self, name: &str) -> Result<TypeId, ModelError> {
        self.lookup(name).ok_or_else(|| ModelError::UnresolvedType(name.to_string()))
    }

    /// Returns the type behind a handle.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&DataType> {
        self.types.get(id.0)
    }

    /// Returns the type behind a handle or an error for foreign handles.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownTypeId`] when the handle was not issued here.
    pub fn data_type(&self, id: TypeId) -> Result<&DataType, ModelError> {
        self.get(id).ok_or(ModelError::UnknownTypeId(id.0))
    }

    /// Returns the name of the type behind a handle.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownTypeId`] when the handle was not issued here.
    pub fn name_of(&self, id: TypeId) -> Result<&str, ModelError> {
        self.data_type(id).map(DataType::name)
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over all types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &DataType)> {
        self.types.iter().enumerate().map(|(index, data_type)| (TypeId(index), data_type))
    }

    /// Registers a new, empty type under a name that must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] for blank names and
    /// [`ModelError::DuplicateType`] when the name is already registered.
    pub fn insert(&mut self, name: &str) -> Result<TypeId, ModelError> {
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.index.contains_key(name) {
            return Err(ModelError::DuplicateType(name.to_string()));
        }
        let id = TypeId(self.types.len());
        self.types.push(DataType {
            name: name.to_string(),
            fields: Vec::new(),
        });
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Appends a field to a registered type.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownTypeId`] when either handle is foreign.
    pub fn push_field(&mut self, id: TypeId, field: DataTypeField) -> Result<(), ModelError> {
        if let FieldType::Named(target) = field.field_type {
            self.data_type(target)?;
        }
        let data_type = self.types.get_mut(id.0).ok_or(ModelError::UnknownTypeId(id.0))?;
        data_type.fields.push(field);
        Ok(())
    }
}
