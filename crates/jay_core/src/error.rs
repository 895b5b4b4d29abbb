//! Catalogue error taxonomy.
//!
//! # Responsibility
//! - Carry enough structured data to render every failure without
//!   re-querying the store.
//! - Classify failures into user-facing and internal.
//!
//! # Invariants
//! - `Ambiguous` carries every candidate in repository order.
//! - `DuplicateId` and `Repo` are internal; everything else is the user's to fix.

use crate::display::{format_optional, render_table};
use crate::model::identity::{EntityId, Lookup};
use crate::model::item::ItemValidationError;
use crate::model::listing::Candidate;
use crate::repo::catalogue_repo::RepoError;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type CatalogueResult<T> = Result<T, CatalogueError>;

/// What a lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Container,
    Item,
    /// Either kind, as used by delete.
    Object,
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Container => "container",
            Self::Item => "item",
            Self::Object => "object",
        })
    }
}

/// Whether the user caused a failure or the program did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    UserFacing,
    Internal,
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("{subject} {lookup} does not exist")]
    NotFound { subject: Subject, lookup: Lookup },
    #[error("found {} {subject}s named \"{name}\"", .candidates.len())]
    Ambiguous {
        subject: Subject,
        name: String,
        candidates: Vec<Candidate>,
    },
    #[error("identifier {0} already exists in the store")]
    DuplicateId(EntityId),
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),
    #[error("name must not be blank")]
    EmptyName,
    #[error("container \"{name}\" ({id}) still holds {item_count} item(s)")]
    ContainerNotEmpty {
        id: EntityId,
        name: String,
        item_count: usize,
    },
    #[error("{0}")]
    Repo(#[source] RepoError),
}

impl From<RepoError> for CatalogueError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateId(id) => Self::DuplicateId(id),
            RepoError::Validation(ItemValidationError::NonPositiveQuantity(quantity)) => {
                Self::InvalidQuantity(quantity)
            }
            other => Self::Repo(other),
        }
    }
}

impl CatalogueError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateId(_) | Self::Repo(_) => ErrorClass::Internal,
            _ => ErrorClass::UserFacing,
        }
    }

    pub fn is_user_facing(&self) -> bool {
        self.class() == ErrorClass::UserFacing
    }

    /// Human-readable message. Ambiguity adds a table of every candidate.
    pub fn user_message(&self) -> String {
        match self {
            Self::Ambiguous { candidates, .. } => {
                let rows = candidates
                    .iter()
                    .map(|candidate| {
                        vec![
                            candidate.kind.to_string(),
                            candidate.id.to_string(),
                            format_optional(candidate.description.as_deref()),
                            format_optional(candidate.category.as_deref()),
                        ]
                    })
                    .collect::<Vec<_>>();
                format!(
                    "{self}.\n{}",
                    render_table(&["kind", "id", "description", "type"], &rows)
                )
            }
            other => format!("{other}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogueError, ErrorClass, Subject};
    use crate::model::identity::{EntityId, Lookup};
    use crate::model::item::ItemValidationError;
    use crate::model::listing::{Candidate, EntityKind};
    use crate::repo::catalogue_repo::RepoError;

    #[test]
    fn not_found_message_names_lookup_mode() {
        let err = CatalogueError::NotFound {
            subject: Subject::Container,
            lookup: Lookup::ByName("Garage".to_string()),
        };
        assert_eq!(err.user_message(), "container named \"Garage\" does not exist.");
    }

    #[test]
    fn ambiguous_message_lists_every_candidate() {
        let first = EntityId::generate();
        let second = EntityId::generate();
        let err = CatalogueError::Ambiguous {
            subject: Subject::Container,
            name: "Box".to_string(),
            candidates: vec![
                Candidate {
                    kind: EntityKind::Container,
                    id: first,
                    description: Some("red".to_string()),
                    category: Some("DEFAULT".to_string()),
                },
                Candidate {
                    kind: EntityKind::Container,
                    id: second,
                    description: None,
                    category: Some("bin".to_string()),
                },
            ],
        };

        let message = err.user_message();
        assert!(message.starts_with("found 2 containers named \"Box\"."));
        assert!(message.contains(&first.to_string()));
        assert!(message.contains(&second.to_string()));
        assert!(message.contains("| description |"));
        assert!(message.contains("| red "));
    }

    #[test]
    fn repo_errors_are_reclassified() {
        let id = EntityId::generate();
        let duplicate = CatalogueError::from(RepoError::DuplicateId(id));
        assert!(matches!(duplicate, CatalogueError::DuplicateId(found) if found == id));
        assert_eq!(duplicate.class(), ErrorClass::Internal);

        let quantity = CatalogueError::from(RepoError::Validation(
            ItemValidationError::NonPositiveQuantity(0),
        ));
        assert!(matches!(quantity, CatalogueError::InvalidQuantity(0)));
        assert!(quantity.is_user_facing());

        let other = CatalogueError::from(RepoError::InvalidData("bad".to_string()));
        assert_eq!(other.class(), ErrorClass::Internal);
    }
}
