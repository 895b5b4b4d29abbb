//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jay", version, about = "Inventory catalogue of containers and the items inside them")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Path of the catalogue store file
    #[arg(long, global = true, env = "JAY_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, global = true, env = "JAY_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "JAY_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create and insert a new object into the catalogue
    #[command(subcommand, alias = "create")]
    Add(AddCommand),

    /// List objects in the catalogue
    #[command(subcommand, alias = "ls")]
    List(ListCommand),

    /// Remove an object from the catalogue
    #[command(alias = "rm")]
    Delete {
        /// Name or id of a container or item
        name_or_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AddCommand {
    /// Create a new container
    Container {
        /// Name of the container
        name: String,

        /// Reserved for nested containers; currently ignored
        location: Option<String>,

        /// A description of the container
        #[arg(short, long)]
        description: Option<String>,

        /// Category of the container (defaults to DEFAULT)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        category: Option<String>,
    },

    /// Create a new item inside a container
    Item {
        /// Name of the item
        name: String,

        /// Name or id of the container holding the item
        location: String,

        /// Quantity of the item; must be at least 1
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// A description of the item
        #[arg(short, long)]
        description: Option<String>,

        /// Category of the item
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        category: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List every container and item
    All,
    /// Show the container with the given name or id; all containers if omitted
    Container { name_or_id: Option<String> },
    /// Show the item with the given name or id; all items if omitted
    Item { name_or_id: Option<String> },
    /// List the items inside a container; every stored item if omitted
    Within { container_name_or_id: Option<String> },
}

impl Command {
    /// Stable label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Add(AddCommand::Container { .. }) => "add_container",
            Self::Add(AddCommand::Item { .. }) => "add_item",
            Self::List(ListCommand::All) => "list_all",
            Self::List(ListCommand::Container { .. }) => "list_container",
            Self::List(ListCommand::Item { .. }) => "list_item",
            Self::List(ListCommand::Within { .. }) => "list_within",
            Self::Delete { .. } => "delete",
        }
    }
}
