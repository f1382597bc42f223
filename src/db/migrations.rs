//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- SAVED DRINKS
        -- User recipes with their last computed result
        -- ============================================
        CREATE TABLE saved_drinks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,                  -- as entered
            name_key TEXT NOT NULL UNIQUE,       -- normalized, for case-insensitive identity

            -- Originating recipe (RecipeConfig as JSON), kept so results can be recomputed
            recipe_json TEXT NOT NULL,

            -- Cached result - recalculated on save and by recalculate_drinks
            cached_start_volume_oz REAL NOT NULL DEFAULT 0,
            cached_start_abv REAL NOT NULL DEFAULT 0,
            cached_end_volume_oz REAL NOT NULL DEFAULT 0,
            cached_end_abv REAL NOT NULL DEFAULT 0,
            cached_kcal REAL NOT NULL DEFAULT 0,
            cached_sugar REAL NOT NULL DEFAULT 0,       -- grams
            cached_carbs REAL NOT NULL DEFAULT 0,       -- grams
            cached_fat REAL NOT NULL DEFAULT 0,         -- grams
            cached_sodium REAL NOT NULL DEFAULT 0,      -- milligrams
            cached_prep_dilution_oz REAL NOT NULL DEFAULT 0,
            cached_service_melt_oz REAL NOT NULL DEFAULT 0,

            -- Metadata
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_saved_drinks_kcal ON saved_drinks(cached_kcal);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(!needs_migration(&conn).unwrap());
    }

    #[test]
    fn test_fresh_database_needs_migration() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT)",
            [],
        )
        .unwrap();
        assert!(needs_migration(&conn).unwrap());
    }
}
