// crates/contractgen-core/tests/proptest_registry.rs
// ============================================================================
// Module: Type Graph Property-Based Tests
// Description: Property tests for wrapper identity and name uniqueness.
// Purpose: Detect duplicate registrations across arbitrary request orders.
// ============================================================================

//! Property-based tests for type graph invariants.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::HashSet;

use contractgen_core::Cardinality;
use contractgen_core::TypeGraphBuilder;
use contractgen_core::TypeRegistry;
use proptest::prelude::*;

fn cardinality_strategy() -> impl Strategy<Value = Cardinality> {
    prop_oneof![Just(Cardinality::Scalar), Just(Cardinality::List), Just(Cardinality::Optional)]
}

proptest! {
    #[test]
    fn repeated_wrap_returns_identical_handle(
        base in "[A-Z][a-z]{0,8}",
        cardinality in cardinality_strategy(),
        repeats in 1_usize .. 6,
    ) {
        let mut registry = TypeRegistry::new();
        let mut builder = TypeGraphBuilder::new(&mut registry);
        let base_id = builder.type_for(&base).unwrap();
        let first = builder.wrap(base_id, cardinality).unwrap();
        for _ in 0 .. repeats {
            prop_assert_eq!(builder.wrap(base_id, cardinality).unwrap(), first);
        }
        let expected = if cardinality == Cardinality::Scalar { 1 } else { 2 };
        prop_assert_eq!(builder.registry().len(), expected);
    }

    #[test]
    fn arbitrary_requests_keep_names_unique(
        requests in prop::collection::vec(
            ("[A-D][a-c]{0,2}", cardinality_strategy()),
            1 .. 40,
        ),
    ) {
        let mut registry = TypeRegistry::new();
        let mut builder = TypeGraphBuilder::new(&mut registry);
        for (name, cardinality) in &requests {
            let id = builder.type_for(name).unwrap();
            let wrapped = builder.wrap(id, *cardinality).unwrap();
            let wrapped_name = builder.registry().name_of(wrapped).unwrap().to_string();
            let again = builder.type_for(&wrapped_name).unwrap();
            prop_assert_eq!(wrapped, again);
        }
        let mut seen = HashSet::new();
        for (_, data_type) in registry.iter() {
            prop_assert!(seen.insert(data_type.name().to_string()));
        }
    }
}
