// crates/contractgen-config/src/lib.rs
// ============================================================================
// Module: contractgen Config Library
// Description: Canonical config model, validation, and example payload.
// Purpose: Single source of truth for contractgen.toml semantics.
// Dependencies: serde, toml, thiserror
// ============================================================================

//! ## Overview
//! `contractgen-config` defines the configuration model for the generator.
//! Loading is strict and fails closed: oversized, non-UTF-8, or inconsistent
//! files are rejected before any generation run starts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
