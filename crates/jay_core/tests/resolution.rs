use jay_core::db::open_db_in_memory;
use jay_core::resolve::{resolve_container, resolve_entity, resolve_item};
use jay_core::{
    CatalogueError, CatalogueRepository, Container, Entity, EntityId, EntityKind, Item, Lookup,
    SqliteCatalogueRepository, Subject,
};
use std::collections::HashSet;

fn stored_container(repo: &impl CatalogueRepository, name: &str) -> Container {
    let container = Container::new(name, 1_000);
    repo.insert_container(&container).unwrap();
    container
}

fn stored_item(repo: &impl CatalogueRepository, name: &str, location: EntityId) -> Item {
    let item = Item::new(name, location, 1, 2_000);
    repo.insert_item(&item).unwrap();
    item
}

#[test]
fn resolves_container_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    let garage = stored_container(&repo, "Garage");
    stored_container(&repo, "Attic");

    let resolved = resolve_container(&repo, &garage.id.to_string()).unwrap();
    assert_eq!(resolved, garage);
}

#[test]
fn resolves_container_by_id_even_when_names_are_ambiguous() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    let first = stored_container(&repo, "Box");
    stored_container(&repo, "Box");

    let resolved = resolve_container(&repo, &first.id.to_string().to_uppercase()).unwrap();
    assert_eq!(resolved.id, first.id);
}

#[test]
fn resolves_container_by_unique_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    let garage = stored_container(&repo, "Garage");
    stored_container(&repo, "Attic");

    assert_eq!(resolve_container(&repo, "Garage").unwrap(), garage);
}

#[test]
fn ambiguous_container_name_is_an_error_with_all_candidates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    let mut first = Container::new("Box", 1_000);
    first.description = Some("red".to_string());
    repo.insert_container(&first).unwrap();
    let second = stored_container(&repo, "Box");

    match resolve_container(&repo, "Box").unwrap_err() {
        CatalogueError::Ambiguous {
            subject,
            name,
            candidates,
        } => {
            assert_eq!(subject, Subject::Container);
            assert_eq!(name, "Box");
            assert_eq!(candidates.len(), 2);
            let ids: HashSet<_> = candidates.iter().map(|c| c.id).collect();
            assert!(ids.contains(&first.id));
            assert!(ids.contains(&second.id));
            assert_eq!(candidates[0].id, first.id);
            assert_eq!(candidates[0].description.as_deref(), Some("red"));
            assert_eq!(candidates[0].category.as_deref(), Some("DEFAULT"));
            assert!(candidates.iter().all(|c| c.kind == EntityKind::Container));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_name_is_not_found_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    stored_container(&repo, "Garage");

    let err = resolve_container(&repo, "nonexistent").unwrap_err();
    assert!(matches!(
        err,
        CatalogueError::NotFound {
            subject: Subject::Container,
            lookup: Lookup::ByName(ref name),
        } if name == "nonexistent"
    ));
}

#[test]
fn absent_id_is_not_found_by_id_and_never_retried_as_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    let missing = EntityId::generate();
    // A container literally named like the id must not be matched.
    stored_container(&repo, &missing.to_string());

    let err = resolve_container(&repo, &missing.to_string()).unwrap_err();
    assert!(matches!(
        err,
        CatalogueError::NotFound {
            subject: Subject::Container,
            lookup: Lookup::ById(id),
        } if id == missing
    ));
}

#[test]
fn item_resolution_follows_the_same_rules() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    let garage = stored_container(&repo, "Garage");
    let drill = stored_item(&repo, "Drill", garage.id);
    stored_item(&repo, "Screw", garage.id);
    stored_item(&repo, "Screw", garage.id);

    assert_eq!(resolve_item(&repo, "Drill").unwrap(), drill);
    assert_eq!(resolve_item(&repo, &drill.id.to_string()).unwrap(), drill);
    assert!(matches!(
        resolve_item(&repo, "Screw"),
        Err(CatalogueError::Ambiguous { subject: Subject::Item, ref candidates, .. })
            if candidates.len() == 2
    ));
    // Container ids are not item ids.
    assert!(matches!(
        resolve_item(&repo, &garage.id.to_string()),
        Err(CatalogueError::NotFound { subject: Subject::Item, .. })
    ));
}

#[test]
fn entity_resolution_spans_containers_and_items() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    let garage = stored_container(&repo, "Garage");
    let drill = stored_item(&repo, "Drill", garage.id);

    assert_eq!(
        resolve_entity(&repo, &garage.id.to_string()).unwrap(),
        Entity::Container(garage.clone())
    );
    assert_eq!(
        resolve_entity(&repo, &drill.id.to_string()).unwrap(),
        Entity::Item(drill.clone())
    );
    assert_eq!(
        resolve_entity(&repo, "Drill").unwrap(),
        Entity::Item(drill)
    );

    let missing = EntityId::generate();
    assert!(matches!(
        resolve_entity(&repo, &missing.to_string()),
        Err(CatalogueError::NotFound { subject: Subject::Object, lookup: Lookup::ById(id) })
            if id == missing
    ));
}

#[test]
fn entity_name_shared_by_container_and_item_is_ambiguous() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogueRepository::try_new(&conn).unwrap();
    let crate_container = stored_container(&repo, "Crate");
    let crate_item = stored_item(&repo, "Crate", crate_container.id);

    match resolve_entity(&repo, "Crate").unwrap_err() {
        CatalogueError::Ambiguous {
            subject: Subject::Object,
            candidates,
            ..
        } => {
            assert_eq!(candidates.len(), 2);
            assert_eq!(candidates[0].kind, EntityKind::Container);
            assert_eq!(candidates[0].id, crate_container.id);
            assert_eq!(candidates[1].kind, EntityKind::Item);
            assert_eq!(candidates[1].id, crate_item.id);
        }
        other => panic!("unexpected error: {other}"),
    }
}
