//! Container domain model.
//!
//! # Invariants
//! - `id` is assigned once and never reused.
//! - `name` is not unique; lookups by name must surface ambiguity.
//! - `category` falls back to [`DEFAULT_CONTAINER_TYPE`] when not given.

use crate::model::identity::EntityId;
use serde::{Deserialize, Serialize};

/// Type tag stored for containers created without an explicit type.
pub const DEFAULT_CONTAINER_TYPE: &str = "DEFAULT";

/// A named storage location that can hold items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    /// Serialized as `type` to match the store column.
    #[serde(rename = "type")]
    pub category: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Container {
    /// Creates a container with a freshly generated id and default type.
    pub fn new(name: impl Into<String>, created_at: i64) -> Self {
        Self::with_id(EntityId::generate(), name, created_at)
    }

    /// Creates a container with a caller-provided id.
    pub fn with_id(id: EntityId, name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            category: DEFAULT_CONTAINER_TYPE.to_string(),
            created_at,
        }
    }
}
