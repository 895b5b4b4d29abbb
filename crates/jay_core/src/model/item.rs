//! Item domain model.
//!
//! # Responsibility
//! - Define the record for a quantified object stored in a container.
//! - Validate item invariants before persistence.
//!
//! # Invariants
//! - `quantity >= 1`.
//! - `location` weakly references a container by id; the item does not own it.
//! - `modified_at` is never earlier than `created_at`.

use crate::model::identity::EntityId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status assigned to newly created items.
pub const DEFAULT_ITEM_STATUS: &str = "in_stock";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemValidationError {
    #[error("item quantity must be at least 1, got {0}")]
    NonPositiveQuantity(i64),
    #[error("item modified_at {modified_at} is earlier than created_at {created_at}")]
    ModifiedBeforeCreated { created_at: i64, modified_at: i64 },
}

/// A named, quantified object located within a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub quantity: i64,
    /// Id of the container holding this item.
    pub location: EntityId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Bumped on every mutation.
    pub modified_at: i64,
    /// Free-form lifecycle tag; no state machine is enforced.
    pub status: String,
}

impl Item {
    /// Creates an item with a freshly generated id and `in_stock` status.
    pub fn new(
        name: impl Into<String>,
        location: EntityId,
        quantity: i64,
        created_at: i64,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            name: name.into(),
            description: None,
            category: None,
            quantity,
            location,
            created_at,
            modified_at: created_at,
            status: DEFAULT_ITEM_STATUS.to_string(),
        }
    }

    /// Checks item invariants.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        validate_quantity(self.quantity)?;
        if self.modified_at < self.created_at {
            return Err(ItemValidationError::ModifiedBeforeCreated {
                created_at: self.created_at,
                modified_at: self.modified_at,
            });
        }
        Ok(())
    }
}

pub fn validate_quantity(quantity: i64) -> Result<(), ItemValidationError> {
    if quantity < 1 {
        return Err(ItemValidationError::NonPositiveQuantity(quantity));
    }
    Ok(())
}
