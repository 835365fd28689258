//! Skill Plans MCP Server - Main Entry Point
//!
//! This is the main entry point for the skill plan MCP server application.
//! The actual implementation is in the `skill_plans` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use skill_plans::{PlanServerHandler, ServerConfig};
use tracing_subscriber::EnvFilter;

/// Skill Plans MCP Server - undoable skill training plans via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the server configuration file (TOML)
    config: String,

    /// Override the registry ID used as prefix for plan IDs
    #[arg(long)]
    registry_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(registry_id) = args.registry_id {
        config.registry_id = registry_id;
    }

    let handler = PlanServerHandler::new(&config);
    tracing::info!(config = %args.config, "serving skill plans over stdio");
    serve_stdio(handler).await?;
    Ok(())
}
