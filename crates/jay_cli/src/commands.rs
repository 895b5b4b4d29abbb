//! Command dispatch and console output.
//!
//! # Invariants
//! - The store is opened once per invocation and closed on every exit path.
//! - User-facing failures exit with 1, internal failures with 2.

use crate::cli::{AddCommand, Command, ListCommand};
use crate::config::Config;
use jay_core::db::{open_db, DbError};
use jay_core::display::{render_catalogue, render_containers, render_items};
use jay_core::{
    CatalogueError, CatalogueService, CreateContainerRequest, CreateItemRequest, RepoError,
    SqliteCatalogueRepository,
};
use log::{error, info, warn};
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;

const EXIT_USER_ERROR: u8 = 1;
const EXIT_INTERNAL_ERROR: u8 = 2;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot prepare store directory `{path}`: {source}")]
    StoreDirectory {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot open store: {0}")]
    Open(#[from] DbError),
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        Self::Catalogue(value.into())
    }
}

impl CommandError {
    fn is_user_facing(&self) -> bool {
        matches!(self, Self::Catalogue(err) if err.is_user_facing())
    }

    fn user_message(&self) -> String {
        match self {
            Self::Catalogue(err) if err.is_user_facing() => err.user_message(),
            other => format!("internal error: {other}"),
        }
    }
}

/// Runs one command against the configured store and reports the outcome.
pub fn run(config: &Config, command: Command) -> ExitCode {
    let label = command.label();
    let started_at = Instant::now();

    match execute(config, command) {
        Ok(output) => {
            info!(
                "event=command name={label} status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) if err.is_user_facing() => {
            warn!(
                "event=command name={label} status=rejected duration_ms={}",
                started_at.elapsed().as_millis()
            );
            eprintln!("{}", err.user_message());
            ExitCode::from(EXIT_USER_ERROR)
        }
        Err(err) => {
            error!(
                "event=command name={label} status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            eprintln!("{}", err.user_message());
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
    }
}

fn execute(config: &Config, command: Command) -> Result<String, CommandError> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CommandError::StoreDirectory {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let conn = open_db(&config.db_path)?;
    let service = CatalogueService::new(SqliteCatalogueRepository::try_new(&conn)?);

    let output = match command {
        Command::Add(AddCommand::Container {
            name,
            location,
            description,
            category,
        }) => {
            let container = service.create_container(CreateContainerRequest {
                name,
                location,
                description,
                category,
            })?;
            format!(
                "Created container \"{}\" ({}).",
                container.name, container.id
            )
        }
        Command::Add(AddCommand::Item {
            name,
            location,
            quantity,
            description,
            category,
        }) => {
            let item = service.create_item(CreateItemRequest {
                name,
                location,
                quantity,
                description,
                category,
            })?;
            format!(
                "Created item \"{}\" x{} ({}) in container {}.",
                item.name, item.quantity, item.id, item.location
            )
        }
        Command::List(ListCommand::All) => {
            let rows = service.list_all()?;
            if rows.is_empty() {
                "The catalogue is empty.".to_string()
            } else {
                render_catalogue(&rows)
            }
        }
        Command::List(ListCommand::Container { name_or_id: Some(name_or_id) }) => {
            render_containers(&[service.query_container(&name_or_id)?])
        }
        Command::List(ListCommand::Container { name_or_id: None }) => {
            let containers = service.list_containers()?;
            if containers.is_empty() {
                "No containers.".to_string()
            } else {
                render_containers(&containers)
            }
        }
        Command::List(ListCommand::Item { name_or_id: Some(name_or_id) }) => {
            render_items(&[service.query_item(&name_or_id)?])
        }
        Command::List(ListCommand::Item { name_or_id: None })
        | Command::List(ListCommand::Within {
            container_name_or_id: None,
        }) => {
            let items = service.list_items()?;
            if items.is_empty() {
                "No items.".to_string()
            } else {
                render_items(&items)
            }
        }
        Command::List(ListCommand::Within {
            container_name_or_id: Some(container_name_or_id),
        }) => {
            let items = service.list_within(&container_name_or_id)?;
            if items.is_empty() {
                format!("No items in \"{container_name_or_id}\".")
            } else {
                render_items(&items)
            }
        }
        Command::Delete { name_or_id } => {
            let entity = service.delete_entity(&name_or_id)?;
            format!(
                "Deleted {} \"{}\" ({}).",
                entity.kind(),
                entity.name(),
                entity.id()
            )
        }
    };

    Ok(output)
}
