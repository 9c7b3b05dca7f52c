use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{FolderCommands, RecordCommands, StepCommands};

/// Command-line interface for tracking procurement files
///
/// Dossier keeps track of where each procurement file sits in the filing
/// cabinet, who has it out, and how far its monitoring steps have
/// progressed. It can also run as an MCP (Model Context Protocol) server so
/// that AI assistants can work with the same records.
#[derive(Parser)]
#[command(version, about, name = "dossier")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/dossier/dossier.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Dossier CLI
///
/// Without a command the dashboard is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage folders
    #[command(alias = "f")]
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Manage procurement records
    #[command(alias = "r")]
    Record {
        #[command(subcommand)]
        command: RecordCommands,
    },
    /// Record or clear monitoring step dates
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Show totals across all records
    #[command(alias = "d")]
    Dashboard,
    /// Start the MCP server
    Serve,
}
