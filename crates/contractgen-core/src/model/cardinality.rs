// crates/contractgen-core/src/model/cardinality.rs
// ============================================================================
// Module: Cardinality Resolution
// Description: Classify structural nodes as scalar, list, or optional.
// Purpose: Decide which wrapper type, if any, a payload needs.
// Dependencies: crate::ast
// ============================================================================

//! ## Overview
//! Cardinality is resolved without side effects. A direct type reference uses
//! its own marker; any other structure uses the marker on its structural
//! variant; no marker (or no node) means [`Cardinality::Scalar`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::ast::CardinalityMarker;
use crate::ast::ElementStructure;

// ============================================================================
// SECTION: Cardinality
// ============================================================================

/// Resolved cardinality of a structural node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one value.
    Scalar,
    /// Zero or more values.
    List,
    /// Zero or one value.
    Optional,
}

impl Cardinality {
    /// Maps a source marker to a cardinality; absence is scalar.
    #[must_use]
    pub const fn from_marker(marker: Option<CardinalityMarker>) -> Self {
        match marker {
            Some(CardinalityMarker::ZeroOrMore | CardinalityMarker::AtLeastOne) => Self::List,
            Some(CardinalityMarker::ZeroOrOne) => Self::Optional,
            Some(CardinalityMarker::ExactlyOne) | None => Self::Scalar,
        }
    }

    /// Returns true for list cardinality.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List)
    }

    /// Returns true for optional cardinality.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::Optional)
    }
}

/// Resolves the cardinality of a structural description.
#[must_use]
pub const fn resolve_cardinality(structure: Option<&ElementStructure>) -> Cardinality {
    let Some(structure) = structure else {
        return Cardinality::Scalar;
    };
    if let Some(reference) = structure.type_reference() {
        return Cardinality::from_marker(reference.card);
    }
    let marker = match structure {
        ElementStructure::ParameterTree(tree) => tree.card,
        ElementStructure::AtomicParameterList(list) => list.card,
        ElementStructure::SingleParameterNode(node) => node.card(),
    };
    Cardinality::from_marker(marker)
}
