//! Core data-access layer for the pet store.
//! This crate owns the pet record, its wire format and its persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{init_db, ConfigError, DatabaseLocation, StoreConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::pet::{DataValidationError, Pet, PetId, PetValidationError, MAX_TEXT_CHARS};
pub use repo::memory_repo::InMemoryPetRepository;
pub use repo::pet_repo::{PetListQuery, PetRepository, RepoError, RepoResult, SqlitePetRepository};
pub use service::pet_service::PetService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
