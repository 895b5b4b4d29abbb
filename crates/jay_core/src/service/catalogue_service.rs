//! Catalogue use-case service.
//!
//! # Responsibility
//! - Implement create/query/list/delete on top of resolution and the
//!   repository contract.
//!
//! # Invariants
//! - Nothing is persisted before names and quantities are validated.
//! - Every failure is returned as a `CatalogueError`; nothing is retried.
//! - A container holding items cannot be deleted.

use crate::error::{CatalogueError, CatalogueResult};
use crate::model::container::Container;
use crate::model::item::{validate_quantity, Item};
use crate::model::listing::{CatalogueRow, Entity};
use crate::repo::catalogue_repo::CatalogueRepository;
use crate::resolve::{resolve_container, resolve_entity, resolve_item};
use chrono::Utc;

/// Request model for `create_container`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateContainerRequest {
    pub name: String,
    /// Reserved for container nesting; accepted and ignored.
    pub location: Option<String>,
    pub description: Option<String>,
    /// Falls back to `DEFAULT` when `None`.
    pub category: Option<String>,
}

/// Request model for `create_item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemRequest {
    pub name: String,
    /// Container name or id.
    pub location: String,
    pub quantity: i64,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl CreateItemRequest {
    /// Builds a request with quantity 1 and no optional fields.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            quantity: 1,
            description: None,
            category: None,
        }
    }
}

/// Use-case service over an injected catalogue repository.
pub struct CatalogueService<R: CatalogueRepository> {
    repo: R,
}

impl<R: CatalogueRepository> CatalogueService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a container.
    ///
    /// # Contract
    /// - `category` defaults to `DEFAULT`, `description` to `None`.
    /// - Id collisions surface as `DuplicateId`.
    pub fn create_container(&self, request: CreateContainerRequest) -> CatalogueResult<Container> {
        let name = normalize_name(request.name)?;
        let mut container = Container::new(name, now_epoch_ms());
        container.description = request.description;
        if let Some(category) = request.category {
            container.category = category;
        }

        self.repo.insert_container(&container)?;
        Ok(container)
    }

    /// Creates an item inside the container named or identified by
    /// `request.location`.
    ///
    /// # Contract
    /// - Quantity below 1 fails with `InvalidQuantity` before any lookup.
    /// - Location resolution failures propagate unchanged.
    pub fn create_item(&self, request: CreateItemRequest) -> CatalogueResult<Item> {
        let name = normalize_name(request.name)?;
        validate_quantity(request.quantity)
            .map_err(|_| CatalogueError::InvalidQuantity(request.quantity))?;
        let location = resolve_container(&self.repo, &request.location)?;

        let mut item = Item::new(name, location.id, request.quantity, now_epoch_ms());
        item.description = request.description;
        item.category = request.category;

        self.repo.insert_item(&item)?;
        Ok(item)
    }

    pub fn query_container(&self, name_or_id: &str) -> CatalogueResult<Container> {
        resolve_container(&self.repo, name_or_id)
    }

    pub fn query_item(&self, name_or_id: &str) -> CatalogueResult<Item> {
        resolve_item(&self.repo, name_or_id)
    }

    pub fn list_all(&self) -> CatalogueResult<Vec<CatalogueRow>> {
        Ok(self.repo.list_all()?)
    }

    pub fn list_containers(&self) -> CatalogueResult<Vec<Container>> {
        Ok(self.repo.list_containers()?)
    }

    pub fn list_items(&self) -> CatalogueResult<Vec<Item>> {
        Ok(self.repo.list_items()?)
    }

    /// Lists the items stored in one container.
    pub fn list_within(&self, container_name_or_id: &str) -> CatalogueResult<Vec<Item>> {
        let container = resolve_container(&self.repo, container_name_or_id)?;
        Ok(self.repo.items_in_container(container.id)?)
    }

    /// Deletes one container or item and returns the removed record.
    pub fn delete_entity(&self, name_or_id: &str) -> CatalogueResult<Entity> {
        let entity = resolve_entity(&self.repo, name_or_id)?;

        if let Entity::Container(container) = &entity {
            let held = self.repo.items_in_container(container.id)?;
            if !held.is_empty() {
                return Err(CatalogueError::ContainerNotEmpty {
                    id: container.id,
                    name: container.name.clone(),
                    item_count: held.len(),
                });
            }
        }

        self.repo.delete_by_id(entity.id())?;
        Ok(entity)
    }
}

fn normalize_name(name: String) -> CatalogueResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogueError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
