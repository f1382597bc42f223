//! Saved Drink MCP Tools
//!
//! Tools for saving, listing, deleting, and recalculating named drinks.

use rusqlite::TransactionBehavior;
use serde::Serialize;

use crate::db::Database;
use crate::engine::{calculate, ReferenceTables};
use crate::models::{DrinkResult, RecipeConfig, SavedDrink, SavedDrinkCreate};

/// Response for save_drink
#[derive(Debug, Serialize)]
pub struct SaveDrinkResponse {
    pub id: i64,
    pub name: String,
    pub result: DrinkResult,
    /// True when an existing drink with the same name was replaced
    pub overwritten: bool,
    pub updated_at: String,
}

/// Saved drink summary for listing
#[derive(Debug, Serialize)]
pub struct SavedDrinkSummary {
    pub id: i64,
    pub name: String,
    pub start_abv: f64,
    pub start_volume_oz: f64,
    pub total_kcal: f64,
    pub sugar_g: f64,
    pub updated_at: String,
}

/// Response for list_saved_drinks
#[derive(Debug, Serialize)]
pub struct ListSavedDrinksResponse {
    pub drinks: Vec<SavedDrinkSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for delete_saved_drink
#[derive(Debug, Serialize)]
pub struct DeleteSavedDrinkResponse {
    pub success: bool,
    pub name: String,
}

/// One drink whose cached result changed
#[derive(Debug, Serialize)]
pub struct RecalculatedDrink {
    pub id: i64,
    pub name: String,
    pub old_kcal: f64,
    pub new_kcal: f64,
    pub old_abv: f64,
    pub new_abv: f64,
}

/// Response for recalculate_saved_drinks
#[derive(Debug, Serialize)]
pub struct RecalculateResponse {
    pub total: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub changes: Vec<RecalculatedDrink>,
}

/// Calculate a recipe and save it under `name`, overwriting any drink with that name
pub fn save_drink(
    db: &Database,
    tables: &ReferenceTables,
    name: &str,
    recipe: RecipeConfig,
    notes: Option<String>,
) -> Result<SaveDrinkResponse, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Drink name cannot be empty".to_string());
    }

    let result = calculate(&recipe, tables);
    let data = SavedDrinkCreate {
        name: name.to_string(),
        recipe,
        notes,
    };

    // The write lock is taken up front so the existence check and the upsert see the same state
    let (saved, overwritten) = db
        .with_conn_mut(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let existing = SavedDrink::get_by_name(&tx, name)?;
            let saved = SavedDrink::save(&tx, &data, &result)?;
            tx.commit()?;
            Ok((saved, existing.is_some()))
        })
        .map_err(|e| format!("Failed to save drink: {}", e))?;

    tracing::info!("Saved drink '{}' ({:.0} kcal)", saved.name, result.total_kcal);

    Ok(SaveDrinkResponse {
        id: saved.id,
        name: saved.name,
        result: saved.cached_result,
        overwritten,
        updated_at: saved.updated_at,
    })
}

/// Get a saved drink by name (case-insensitive)
pub fn get_saved_drink(db: &Database, name: &str) -> Result<Option<SavedDrink>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    SavedDrink::get_by_name(&conn, name).map_err(|e| format!("Failed to get drink: {}", e))
}

/// List saved drinks with optional name search
pub fn list_saved_drinks(
    db: &Database,
    query: Option<&str>,
    sort_by: &str,
    sort_order: &str,
    limit: i64,
    offset: i64,
) -> Result<ListSavedDrinksResponse, String> {
    let limit = limit.min(200).max(1);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let drinks = SavedDrink::list(&conn, query, sort_by, sort_order, limit, offset)
        .map_err(|e| format!("Failed to list drinks: {}", e))?;

    let total = SavedDrink::count(&conn).map_err(|e| format!("Failed to count drinks: {}", e))?;

    let drinks = drinks
        .into_iter()
        .map(|d| SavedDrinkSummary {
            id: d.id,
            name: d.name,
            start_abv: d.cached_result.start_abv,
            start_volume_oz: d.cached_result.start_volume_oz,
            total_kcal: d.cached_result.total_kcal,
            sugar_g: d.cached_result.sugar_g,
            updated_at: d.updated_at,
        })
        .collect();

    Ok(ListSavedDrinksResponse {
        drinks,
        total,
        limit,
        offset,
    })
}

/// Delete a saved drink by name (case-insensitive)
/// Returns Ok(None) if no drink had that name
pub fn delete_saved_drink(db: &Database, name: &str) -> Result<Option<DeleteSavedDrinkResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = SavedDrink::delete_by_name(&conn, name)
        .map_err(|e| format!("Failed to delete drink: {}", e))?;

    if !deleted {
        return Ok(None);
    }

    tracing::info!("Deleted saved drink '{}'", name.trim());

    Ok(Some(DeleteSavedDrinkResponse {
        success: true,
        name: name.trim().to_string(),
    }))
}

/// Recompute every saved drink with the current tables and refresh changed cached results
pub fn recalculate_saved_drinks(db: &Database, tables: &ReferenceTables) -> Result<RecalculateResponse, String> {
    let (total, changes) = db
        .with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let drinks = SavedDrink::list_all(&tx)?;
            let total = drinks.len();
            let mut changes = Vec::new();

            for drink in drinks {
                let result = calculate(&drink.recipe, tables);
                if result == drink.cached_result {
                    continue;
                }

                SavedDrink::update_cached_result(&tx, drink.id, &result)?;

                changes.push(RecalculatedDrink {
                    id: drink.id,
                    name: drink.name,
                    old_kcal: drink.cached_result.total_kcal,
                    new_kcal: result.total_kcal,
                    old_abv: drink.cached_result.start_abv,
                    new_abv: result.start_abv,
                });
            }

            tx.commit()?;
            Ok((total, changes))
        })
        .map_err(|e| format!("Failed to recalculate drinks: {}", e))?;

    tracing::info!("Recalculated {} saved drinks ({} updated)", total, changes.len());

    Ok(RecalculateResponse {
        total,
        updated: changes.len(),
        unchanged: total - changes.len(),
        changes,
    })
}
