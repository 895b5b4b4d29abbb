//! Name-or-id resolution.
//!
//! # Responsibility
//! - Turn a user token into exactly one entity or a typed failure.
//!
//! # Invariants
//! - Id-shaped tokens are only ever looked up by id, never retried as names.
//! - A name matching more than one entity is always `Ambiguous`; there is
//!   no tie-break by recency, insertion order or anything else.

use crate::error::{CatalogueError, CatalogueResult, Subject};
use crate::model::container::Container;
use crate::model::identity::{EntityId, Lookup};
use crate::model::item::Item;
use crate::model::listing::{Candidate, Entity};
use crate::repo::catalogue_repo::{CatalogueRepository, RepoError};

/// Resolves a container by id or by unique name.
pub fn resolve_container<R>(repo: &R, token: &str) -> CatalogueResult<Container>
where
    R: CatalogueRepository + ?Sized,
{
    match Lookup::parse(token) {
        Lookup::ById(id) => by_id(Subject::Container, id, repo.get_container(id)),
        Lookup::ByName(name) => {
            let matches = repo.containers_by_name(&name)?;
            exactly_one(Subject::Container, name, matches)
        }
    }
}

/// Resolves an item by id or by unique name.
pub fn resolve_item<R>(repo: &R, token: &str) -> CatalogueResult<Item>
where
    R: CatalogueRepository + ?Sized,
{
    match Lookup::parse(token) {
        Lookup::ById(id) => by_id(Subject::Item, id, repo.get_item(id)),
        Lookup::ByName(name) => {
            let matches = repo.items_by_name(&name)?;
            exactly_one(Subject::Item, name, matches)
        }
    }
}

/// Resolves a token against both containers and items.
///
/// By name, containers are listed before items among the candidates.
pub fn resolve_entity<R>(repo: &R, token: &str) -> CatalogueResult<Entity>
where
    R: CatalogueRepository + ?Sized,
{
    match Lookup::parse(token) {
        Lookup::ById(id) => match repo.get_container(id) {
            Ok(container) => Ok(Entity::Container(container)),
            Err(RepoError::NotFound(_)) => {
                by_id(Subject::Object, id, repo.get_item(id)).map(Entity::Item)
            }
            Err(err) => Err(err.into()),
        },
        Lookup::ByName(name) => {
            let mut matches = repo
                .containers_by_name(&name)?
                .into_iter()
                .map(Entity::Container)
                .collect::<Vec<_>>();
            matches.extend(repo.items_by_name(&name)?.into_iter().map(Entity::Item));
            exactly_one(Subject::Object, name, matches)
        }
    }
}

fn by_id<T>(subject: Subject, id: EntityId, found: Result<T, RepoError>) -> CatalogueResult<T> {
    match found {
        Ok(entity) => Ok(entity),
        Err(RepoError::NotFound(_)) => Err(CatalogueError::NotFound {
            subject,
            lookup: Lookup::ById(id),
        }),
        Err(err) => Err(err.into()),
    }
}

fn exactly_one<T>(subject: Subject, name: String, mut matches: Vec<T>) -> CatalogueResult<T>
where
    for<'a> Candidate: From<&'a T>,
{
    match matches.len() {
        0 => Err(CatalogueError::NotFound {
            subject,
            lookup: Lookup::ByName(name),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(CatalogueError::Ambiguous {
            subject,
            name,
            candidates: matches.iter().map(Candidate::from).collect(),
        }),
    }
}
