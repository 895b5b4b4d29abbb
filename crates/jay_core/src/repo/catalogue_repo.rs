//! Catalogue repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-statement persistence for containers and items.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - An id exists in at most one of `containers` / `items`.
//! - Item write paths call `Item::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::schema::{schema_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::container::Container;
use crate::model::identity::EntityId;
use crate::model::item::{Item, ItemValidationError};
use crate::model::listing::{CatalogueRow, EntityKind};
use rusqlite::ffi;
use rusqlite::{params, Connection, ErrorCode, Row};
use thiserror::Error;

const CONTAINER_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    type,
    created_at
FROM containers";

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    type,
    quantity,
    location_id,
    created_at,
    modified_at,
    status
FROM items";

const CONTAINER_COLUMNS: [&str; 5] = ["id", "name", "description", "type", "created_at"];
const ITEM_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "description",
    "type",
    "quantity",
    "location_id",
    "created_at",
    "modified_at",
    "status",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-level failure for catalogue operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Validation(#[from] ItemValidationError),
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("id already exists: {0}")]
    DuplicateId(EntityId),
    #[error("no entity with id {0}")]
    NotFound(EntityId),
    #[error("container {0} is still referenced by items")]
    ContainerInUse(EntityId),
    #[error("catalogue repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("catalogue repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("catalogue repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("invalid persisted catalogue data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalogue persistence.
pub trait CatalogueRepository {
    /// Inserts one container. Fails with `DuplicateId` if the id is taken.
    fn insert_container(&self, container: &Container) -> RepoResult<()>;
    /// Inserts one item. Fails with `DuplicateId` if the id is taken.
    fn insert_item(&self, item: &Item) -> RepoResult<()>;
    fn get_container(&self, id: EntityId) -> RepoResult<Container>;
    fn get_item(&self, id: EntityId) -> RepoResult<Item>;
    /// Exact, case-sensitive name match in insertion order.
    fn containers_by_name(&self, name: &str) -> RepoResult<Vec<Container>>;
    fn items_by_name(&self, name: &str) -> RepoResult<Vec<Item>>;
    fn items_in_container(&self, container_id: EntityId) -> RepoResult<Vec<Item>>;
    /// Every container in insertion order.
    fn list_containers(&self) -> RepoResult<Vec<Container>>;
    /// Every item in insertion order.
    fn list_items(&self) -> RepoResult<Vec<Item>>;
    /// Merged report over both tables, tagged by kind.
    fn list_all(&self) -> RepoResult<Vec<CatalogueRow>>;
    /// Deletes the entity with `id` from whichever table holds it.
    fn delete_by_id(&self, id: EntityId) -> RepoResult<EntityKind>;
}

/// SQLite-backed catalogue repository borrowing an open store handle.
pub struct SqliteCatalogueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogueRepository<'conn> {
    /// Constructs a repository from a connection returned by `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CatalogueRepository for SqliteCatalogueRepository<'_> {
    fn insert_container(&self, container: &Container) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "INSERT INTO containers (id, name, description, type, created_at)
                 SELECT ?1, ?2, ?3, ?4, ?5
                 WHERE NOT EXISTS (SELECT 1 FROM items WHERE id = ?1);",
                params![
                    container.id.to_string(),
                    container.name.as_str(),
                    container.description.as_deref(),
                    container.category.as_str(),
                    container.created_at,
                ],
            )
            .map_err(|err| map_insert_error(err, container.id, None))?;

        if changed == 0 {
            return Err(RepoError::DuplicateId(container.id));
        }

        Ok(())
    }

    fn insert_item(&self, item: &Item) -> RepoResult<()> {
        item.validate()?;

        let changed = self
            .conn
            .execute(
                "INSERT INTO items (
                    id,
                    name,
                    description,
                    type,
                    quantity,
                    location_id,
                    created_at,
                    modified_at,
                    status
                 )
                 SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9
                 WHERE NOT EXISTS (SELECT 1 FROM containers WHERE id = ?1);",
                params![
                    item.id.to_string(),
                    item.name.as_str(),
                    item.description.as_deref(),
                    item.category.as_deref(),
                    item.quantity,
                    item.location.to_string(),
                    item.created_at,
                    item.modified_at,
                    item.status.as_str(),
                ],
            )
            .map_err(|err| map_insert_error(err, item.id, Some(item.location)))?;

        if changed == 0 {
            return Err(RepoError::DuplicateId(item.id));
        }

        Ok(())
    }

    fn get_container(&self, id: EntityId) -> RepoResult<Container> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTAINER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return parse_container_row(row);
        }

        Err(RepoError::NotFound(id))
    }

    fn get_item(&self, id: EntityId) -> RepoResult<Item> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return parse_item_row(row);
        }

        Err(RepoError::NotFound(id))
    }

    fn containers_by_name(&self, name: &str) -> RepoResult<Vec<Container>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTAINER_SELECT_SQL} WHERE name = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([name])?;
        let mut containers = Vec::new();
        while let Some(row) = rows.next()? {
            containers.push(parse_container_row(row)?);
        }
        Ok(containers)
    }

    fn list_containers(&self) -> RepoResult<Vec<Container>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTAINER_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut containers = Vec::new();
        while let Some(row) = rows.next()? {
            containers.push(parse_container_row(row)?);
        }
        Ok(containers)
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn items_by_name(&self, name: &str) -> RepoResult<Vec<Item>> {
        self.query_items(
            &format!("{ITEM_SELECT_SQL} WHERE name = ?1 ORDER BY rowid ASC;"),
            name.to_string(),
        )
    }

    fn items_in_container(&self, container_id: EntityId) -> RepoResult<Vec<Item>> {
        self.query_items(
            &format!("{ITEM_SELECT_SQL} WHERE location_id = ?1 ORDER BY rowid ASC;"),
            container_id.to_string(),
        )
    }

    fn list_all(&self) -> RepoResult<Vec<CatalogueRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT 'container' AS kind, id, name, description, type, created_at FROM containers
             UNION ALL
             SELECT 'item' AS kind, id, name, description, type, created_at FROM items
             ORDER BY created_at ASC, kind ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut report = Vec::new();
        while let Some(row) = rows.next()? {
            report.push(parse_catalogue_row(row)?);
        }
        Ok(report)
    }

    fn delete_by_id(&self, id: EntityId) -> RepoResult<EntityKind> {
        let id_text = id.to_string();

        let removed_container = self
            .conn
            .execute("DELETE FROM containers WHERE id = ?1;", [&id_text])
            .map_err(|err| match constraint_code(&err) {
                // RESTRICT actions report as trigger constraints.
                Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY | ffi::SQLITE_CONSTRAINT_TRIGGER) => {
                    RepoError::ContainerInUse(id)
                }
                _ => err.into(),
            })?;
        if removed_container > 0 {
            return Ok(EntityKind::Container);
        }

        let removed_item = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [&id_text])?;
        if removed_item > 0 {
            return Ok(EntityKind::Item);
        }

        Err(RepoError::NotFound(id))
    }
}

impl SqliteCatalogueRepository<'_> {
    fn query_items(&self, sql: &str, key: String) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([key])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }
}

fn map_insert_error(err: rusqlite::Error, id: EntityId, location: Option<EntityId>) -> RepoError {
    match (constraint_code(&err), location) {
        (Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY), _) => RepoError::DuplicateId(id),
        (Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY), Some(location)) => RepoError::NotFound(location),
        _ => err.into(),
    }
}

fn constraint_code(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(failure.extended_code)
        }
        _ => None,
    }
}

fn parse_id(row: &Row<'_>, table: &str, column: &str) -> RepoResult<EntityId> {
    let text: String = row.get(column)?;
    EntityId::parse(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid id value `{text}` in {table}.{column}"))
    })
}

fn parse_container_row(row: &Row<'_>) -> RepoResult<Container> {
    Ok(Container {
        id: parse_id(row, "containers", "id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        category: row.get("type")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let item = Item {
        id: parse_id(row, "items", "id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        category: row.get("type")?,
        quantity: row.get("quantity")?,
        location: parse_id(row, "items", "location_id")?,
        created_at: row.get("created_at")?,
        modified_at: row.get("modified_at")?,
        status: row.get("status")?,
    };
    item.validate()
        .map_err(|err| RepoError::InvalidData(format!("item {}: {err}", item.id)))?;
    Ok(item)
}

fn parse_catalogue_row(row: &Row<'_>) -> RepoResult<CatalogueRow> {
    let kind_text: String = row.get("kind")?;
    let kind = EntityKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid entity kind `{kind_text}` in report"))
    })?;

    Ok(CatalogueRow {
        kind,
        id: parse_id(row, kind_table(kind), "id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        category: row.get("type")?,
        created_at: row.get("created_at")?,
    })
}

fn kind_table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Container => "containers",
        EntityKind::Item => "items",
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = schema_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    for (table, columns) in [
        ("containers", &CONTAINER_COLUMNS[..]),
        ("items", &ITEM_COLUMNS[..]),
    ] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
