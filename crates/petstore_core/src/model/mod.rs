//! Domain model for the pet store.
//!
//! # Responsibility
//! - Define the pet record and its wire-format rules.
//!
//! # Invariants
//! - Identity is a store-assigned integer, never chosen by callers.
//! - Deletion is a hard delete; there are no tombstones.

pub mod pet;
