//! Recompute the cached result of every saved drink
//! Usage: cargo run --bin recalculate_drinks -- [--dry-run]

use drinkcalc::config::Config;
use drinkcalc::db::{migrations, Database};
use drinkcalc::engine::{calculate, ReferenceTables};
use drinkcalc::models::SavedDrink;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dry_run = std::env::args().skip(1).any(|a| a == "--dry-run");

    let config = Config::from_env();
    println!("Database: {}", config.database_path.display());

    let tables = match &config.tables_path {
        Some(path) => ReferenceTables::from_file(path)?,
        None => ReferenceTables::default(),
    };

    let database = Database::new(&config.database_path)?;

    database.with_conn(|conn| {
        migrations::run_migrations(conn)?;

        let drinks = SavedDrink::list_all(conn)?;
        println!("Found {} saved drinks", drinks.len());

        let mut updated = 0;
        for drink in &drinks {
            let result = calculate(&drink.recipe, &tables);
            if result == drink.cached_result {
                continue;
            }

            println!("\n{} (ID {})", drink.name, drink.id);
            println!("  Old: {:.1} kcal, {:.1}% ABV", drink.cached_result.total_kcal, drink.cached_result.start_abv);
            println!("  New: {:.1} kcal, {:.1}% ABV", result.total_kcal, result.start_abv);
            println!("  Difference: {:+.1} kcal", result.total_kcal - drink.cached_result.total_kcal);

            if !dry_run {
                SavedDrink::update_cached_result(conn, drink.id, &result)?;
            }
            updated += 1;
        }

        if dry_run {
            println!("\n{} of {} drinks would change (dry run)", updated, drinks.len());
        } else {
            println!("\nUpdated {} of {} drinks", updated, drinks.len());
        }
        Ok(())
    })?;

    Ok(())
}
