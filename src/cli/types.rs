use clap::Parser;
use std::path::PathBuf;

use realestate_mcp::api::DEFAULT_API_BASE;
use realestate_mcp::suburbs::default_table_path;

/// Real estate MCP server - residential sale listings from realestate.co.nz
///
/// Available tools:
/// - get-listings: suburb search with filters, or best match for a street address
/// - get-listing-detail: full detail for one listing id
#[derive(Parser, Debug)]
#[command(name = "realestate-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Suburb table (CSV with `name, code` header)
    ///
    /// Defaults to suburbs.csv next to the executable, then ./suburbs.csv
    #[arg(long, value_name = "PATH", env = "REALESTATE_SUBURBS_CSV")]
    pub suburbs: Option<PathBuf>,

    /// Base URL of the upstream search API
    #[arg(
        long,
        value_name = "URL",
        env = "REALESTATE_API_BASE",
        default_value = DEFAULT_API_BASE
    )]
    pub api_base: String,

    /// List available tool names and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Print the loaded suburb table and exit
    #[arg(long)]
    pub list_suburbs: bool,
}

impl Cli {
    /// Suburb table location: explicit flag/env value, else the default search
    pub fn suburbs_path(&self) -> PathBuf {
        self.suburbs.clone().unwrap_or_else(default_table_path)
    }
}
