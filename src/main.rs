use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use realestate_mcp::api::ListingsApi;
use realestate_mcp::stdio::{RealEstateServer, metadata};
use realestate_mcp::suburbs::SuburbDirectory;
use realestate_mcp::tools::ListingService;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    if cli.list_tools {
        println!("Available tools:");
        for tool in metadata::tool_names() {
            println!("  - {tool}");
        }
        return Ok(());
    }

    // Suburb table is loaded once and shared read-only with the tool handler
    let suburbs_path = cli.suburbs_path();
    let suburbs = match SuburbDirectory::load(&suburbs_path) {
        Ok(directory) => directory,
        Err(e) => {
            log::error!("Failed to load suburb table: {e}");
            return Err(e.into());
        }
    };
    log::info!(
        "Loaded {} suburbs from {}",
        suburbs.len(),
        suburbs_path.display()
    );

    if cli.list_suburbs {
        for (name, code) in suburbs.entries() {
            println!("{code}\t{name}");
        }
        return Ok(());
    }

    let api = ListingsApi::new(cli.api_base.as_str()).context("Failed to build HTTP client")?;
    log::info!("Using listings API at {}", api.base_url());

    let server = RealEstateServer::new(ListingService::new(Arc::new(suburbs), api));

    eprintln!("Real Estate MCP Server running on stdio");
    server.serve_stdio().await
}
