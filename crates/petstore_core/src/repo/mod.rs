//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store contract the pet service talks to.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Pet::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod memory_repo;
pub mod pet_repo;
