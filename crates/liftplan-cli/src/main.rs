//! Liftplan CLI Application
//!
//! Command-line interface and MCP server for the workout session engine.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use liftplan_core::EngineBuilder;
use log::info;
use mcp::{run_stdio_server, LiftplanMcpServer};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        catalog,
        config,
        no_color,
        command,
    } = Args::parse();

    let engine = EngineBuilder::new()
        .with_catalog_path(catalog)
        .with_config_path(config)
        .build()
        .context("Failed to initialize engine")?;

    info!(
        "Liftplan started with {} catalog exercises",
        engine.catalog().len()
    );

    match command {
        Commands::Serve => {
            info!("Starting Liftplan MCP server");
            run_stdio_server(LiftplanMcpServer::new(engine))
                .await
                .context("MCP server failed")
        }
        command => Cli::new(engine, TerminalRenderer::new(!no_color)).handle_command(command),
    }
}
