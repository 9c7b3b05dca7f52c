//! Dossier CLI Application
//!
//! Command-line interface and MCP server for tracking procurement files.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use dossier_core::TrackerBuilder;
use log::info;
use mcp::{run_stdio_server, DossierMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Dossier started");

    match command {
        Some(Folder { command }) => {
            Cli::new(tracker, renderer)
                .handle_folder_command(command)
                .await
        }
        Some(Record { command }) => {
            Cli::new(tracker, renderer)
                .handle_record_command(command)
                .await
        }
        Some(Step { command }) => {
            Cli::new(tracker, renderer)
                .handle_step_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Dossier MCP server");
            run_stdio_server(DossierMcpServer::new(tracker))
                .await
                .context("MCP server failed")
        }
        Some(Dashboard) | None => Cli::new(tracker, renderer).dashboard().await,
    }
}
