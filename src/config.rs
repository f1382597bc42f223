//! Runtime configuration
//!
//! Everything is read from environment variables with defaults relative to
//! the project root:
//!
//! - `DRINKCALC_DATABASE_PATH` - SQLite file (default `data/drinkcalc.db`)
//! - `DRINKCALC_CATALOG` - classic recipe catalog, file path or http(s) URL
//!   (default `data/classics.json`)
//! - `DRINKCALC_TABLES_PATH` - optional reference table overlay (JSON)

use std::path::PathBuf;

use crate::catalog::CatalogSource;

pub const DATABASE_PATH_VAR: &str = "DRINKCALC_DATABASE_PATH";
pub const CATALOG_VAR: &str = "DRINKCALC_CATALOG";
pub const TABLES_PATH_VAR: &str = "DRINKCALC_TABLES_PATH";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub catalog: CatalogSource,
    pub tables_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_path = std::env::var(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir().join("drinkcalc.db"));

        let catalog = std::env::var(CATALOG_VAR)
            .map(|s| CatalogSource::parse(&s))
            .unwrap_or_else(|_| CatalogSource::File(data_dir().join("classics.json")));

        let tables_path = std::env::var(TABLES_PATH_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            database_path,
            catalog,
            tables_path,
        }
    }
}

/// The project's `data/` directory
fn data_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path
}
