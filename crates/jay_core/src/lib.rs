//! Core logic for the `jay` inventory catalogue.
//! This crate is the single source of truth for catalogue invariants.

pub mod db;
pub mod display;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod resolve;
pub mod service;

pub use error::{CatalogueError, CatalogueResult, ErrorClass, Subject};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::container::{Container, DEFAULT_CONTAINER_TYPE};
pub use model::identity::{EntityId, IdentityError, Lookup};
pub use model::item::{Item, ItemValidationError, DEFAULT_ITEM_STATUS};
pub use model::listing::{Candidate, CatalogueRow, Entity, EntityKind};
pub use repo::catalogue_repo::{
    CatalogueRepository, RepoError, RepoResult, SqliteCatalogueRepository,
};
pub use service::catalogue_service::{
    CatalogueService, CreateContainerRequest, CreateItemRequest,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
