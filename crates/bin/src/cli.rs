//! CLI argument definitions for the Confstore binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Confstore hierarchical configuration store
#[derive(Parser, Debug)]
#[command(name = "confstore")]
#[command(about = "Confstore: inspect and edit a hierarchical configuration document")]
#[command(version)]
pub struct Cli {
    /// JSON document holding the configuration tree
    #[arg(short = 'f', long, default_value = "confstore.json", env = "CONFSTORE_DATA_FILE")]
    pub data_file: PathBuf,

    /// JSON file overriding reserved field names
    #[arg(short, long, env = "CONFSTORE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the subtree at a path
    Get(GetArgs),
    /// Replace the subtree at a path with a JSON value
    Put(PutArgs),
    /// Delete the subtree at a path
    Remove(PathArgs),
    /// Check whether a node exists at a path
    Exists(PathArgs),
    /// Find the path of the node carrying an identifier
    Lookup(LookupArgs),
    /// List every indexed identifier and its path
    Index,
}

impl Commands {
    /// Whether the command changes the document
    pub fn mutates(&self) -> bool {
        matches!(self, Commands::Put(_) | Commands::Remove(_))
    }
}

/// Arguments for commands taking only a path
#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Canonical path, e.g. /devices/dev1 or /devices/dev1/conns/#0 ("" for the root)
    pub path: String,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Canonical path of the node
    pub path: String,

    /// Stamp the node with its optimistic-lock fingerprint
    #[arg(long)]
    pub lock: bool,
}

/// Arguments for the put command
#[derive(clap::Args, Debug)]
pub struct PutArgs {
    /// Canonical path of the node
    pub path: String,

    /// New subtree as JSON
    pub value: String,

    /// Validate the fingerprint carried by the value before writing
    #[arg(long)]
    pub lock: bool,
}

/// Arguments for the lookup command
#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    /// UUID of the node
    pub id: String,
}
