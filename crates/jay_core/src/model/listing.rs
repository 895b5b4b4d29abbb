//! Read models shared by listing and disambiguation.

use crate::model::container::Container;
use crate::model::identity::EntityId;
use crate::model::item::Item;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Which table an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Container,
    Item,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Item => "item",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "container" => Some(Self::Container),
            "item" => Some(Self::Item),
            _ => None,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the merged "list all" report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueRow {
    pub kind: EntityKind,
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub created_at: i64,
}

/// Minimal view of one match in an ambiguous name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub kind: EntityKind,
    pub id: EntityId,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

impl From<&Container> for Candidate {
    fn from(value: &Container) -> Self {
        Self {
            kind: EntityKind::Container,
            id: value.id,
            description: value.description.clone(),
            category: Some(value.category.clone()),
        }
    }
}

impl From<&Item> for Candidate {
    fn from(value: &Item) -> Self {
        Self {
            kind: EntityKind::Item,
            id: value.id,
            description: value.description.clone(),
            category: value.category.clone(),
        }
    }
}

/// Either kind of catalogue entity, as returned by cross-kind resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Container(Container),
    Item(Item),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Container(container) => container.id,
            Self::Item(item) => item.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Container(_) => EntityKind::Container,
            Self::Item(_) => EntityKind::Item,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Container(container) => &container.name,
            Self::Item(item) => &item.name,
        }
    }
}

impl From<&Entity> for Candidate {
    fn from(value: &Entity) -> Self {
        match value {
            Entity::Container(container) => Self::from(container),
            Entity::Item(item) => Self::from(item),
        }
    }
}
