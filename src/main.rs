//! Drink Calculator (drinkcalc)
//!
//! An MCP server estimating cocktail ABV, dilution, and nutrition.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use drinkcalc::catalog;
use drinkcalc::config::Config;
use drinkcalc::db;
use drinkcalc::engine::ReferenceTables;
use drinkcalc::mcp::DrinkService;
use drinkcalc::build_info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("drinkcalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Database path: {}", config.database_path.display());

    // Ensure data directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize database
    eprintln!("Initializing database...");
    let database = db::Database::new(&config.database_path)?;

    // Run migrations
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    // Reference tables, with an optional overlay
    let tables = match &config.tables_path {
        Some(path) => match ReferenceTables::from_file(path) {
            Ok(tables) => {
                tracing::info!("Loaded reference tables from {}", path.display());
                tables
            }
            Err(e) => {
                tracing::warn!("Ignoring reference tables overlay: {}", e);
                ReferenceTables::default()
            }
        },
        None => ReferenceTables::default(),
    };

    // Classic catalog (blocking fetch for URL sources)
    let source = config.catalog.clone();
    eprintln!("Classic catalog: {}", source.describe());
    let catalog = tokio::task::spawn_blocking(move || catalog::load(&source)).await?;

    // Create the drinkcalc service
    let service = DrinkService::new(config.database_path, database, tables, catalog);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
