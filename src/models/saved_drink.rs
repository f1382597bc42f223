//! Saved drink model
//!
//! A named recipe with its cached result. Names are unique case-insensitively:
//! saving under an existing name overwrites that drink.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::{DrinkResult, RecipeConfig};
use crate::db::DbResult;
use crate::engine::normalize_name;

/// A saved drink with cached result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedDrink {
    pub id: i64,
    pub name: String,
    pub recipe: RecipeConfig,
    pub cached_result: DrinkResult,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for saving a drink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedDrinkCreate {
    pub name: String,
    pub recipe: RecipeConfig,
    pub notes: Option<String>,
}

impl SavedDrink {
    /// Create a SavedDrink from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let recipe_json: String = row.get("recipe_json")?;
        let recipe = serde_json::from_str(&recipe_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
        })?;

        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            recipe,
            cached_result: DrinkResult {
                start_volume_oz: row.get("cached_start_volume_oz")?,
                start_abv: row.get("cached_start_abv")?,
                end_volume_oz: row.get("cached_end_volume_oz")?,
                end_abv: row.get("cached_end_abv")?,
                total_kcal: row.get("cached_kcal")?,
                sugar_g: row.get("cached_sugar")?,
                carbs_g: row.get("cached_carbs")?,
                fat_g: row.get("cached_fat")?,
                sodium_mg: row.get("cached_sodium")?,
                prep_dilution_oz: row.get("cached_prep_dilution_oz")?,
                service_melt_oz: row.get("cached_service_melt_oz")?,
            },
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a drink, or overwrite the drink with the same normalized name
    pub fn save(conn: &Connection, data: &SavedDrinkCreate, result: &DrinkResult) -> DbResult<Self> {
        let name = data.name.trim();
        let name_key = normalize_name(name);
        let recipe_json = serde_json::to_string(&data.recipe)?;

        conn.execute(
            r#"
            INSERT INTO saved_drinks (
                name, name_key, recipe_json,
                cached_start_volume_oz, cached_start_abv, cached_end_volume_oz, cached_end_abv,
                cached_kcal, cached_sugar, cached_carbs, cached_fat, cached_sodium,
                cached_prep_dilution_oz, cached_service_melt_oz, notes
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            ON CONFLICT(name_key) DO UPDATE SET
                name = excluded.name,
                recipe_json = excluded.recipe_json,
                cached_start_volume_oz = excluded.cached_start_volume_oz,
                cached_start_abv = excluded.cached_start_abv,
                cached_end_volume_oz = excluded.cached_end_volume_oz,
                cached_end_abv = excluded.cached_end_abv,
                cached_kcal = excluded.cached_kcal,
                cached_sugar = excluded.cached_sugar,
                cached_carbs = excluded.cached_carbs,
                cached_fat = excluded.cached_fat,
                cached_sodium = excluded.cached_sodium,
                cached_prep_dilution_oz = excluded.cached_prep_dilution_oz,
                cached_service_melt_oz = excluded.cached_service_melt_oz,
                notes = excluded.notes,
                updated_at = datetime('now')
            "#,
            params![
                name,
                name_key,
                recipe_json,
                result.start_volume_oz,
                result.start_abv,
                result.end_volume_oz,
                result.end_abv,
                result.total_kcal,
                result.sugar_g,
                result.carbs_g,
                result.fat_g,
                result.sodium_mg,
                result.prep_dilution_oz,
                result.service_melt_oz,
                data.notes,
            ],
        )?;

        Self::get_by_name(conn, name)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a saved drink by name (case-insensitive)
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM saved_drinks WHERE name_key = ?1")?;

        let result = stmt.query_row([normalize_name(name)], Self::from_row);
        match result {
            Ok(drink) => Ok(Some(drink)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a saved drink by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM saved_drinks WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(drink) => Ok(Some(drink)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List saved drinks with optional name search
    pub fn list(
        conn: &Connection,
        query: Option<&str>,
        sort_by: &str,
        sort_order: &str,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let order = if sort_order.to_lowercase() == "desc" { "DESC" } else { "ASC" };
        let sort_col = match sort_by.to_lowercase().as_str() {
            "kcal" | "calories" => "cached_kcal",
            "abv" => "cached_start_abv",
            "created_at" => "created_at",
            "updated_at" => "updated_at",
            _ => "name_key",
        };

        let drinks = match query {
            Some(q) => {
                let sql = format!(
                    "SELECT * FROM saved_drinks WHERE name_key LIKE ?1 ESCAPE '\\' ORDER BY {} {} LIMIT ?2 OFFSET ?3",
                    sort_col, order
                );
                let mut stmt = conn.prepare(&sql)?;
                let pattern = format!("%{}%", escape_like(&normalize_name(q)));
                let rows = stmt
                    .query_map(params![pattern, limit, offset], Self::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let sql = format!(
                    "SELECT * FROM saved_drinks ORDER BY {} {} LIMIT ?1 OFFSET ?2",
                    sort_col, order
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params![limit, offset], Self::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };

        Ok(drinks)
    }

    /// Every saved drink, in id order
    pub fn list_all(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM saved_drinks ORDER BY id")?;
        let drinks = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(drinks)
    }

    /// Count saved drinks
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM saved_drinks", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Update the cached result for a drink
    pub fn update_cached_result(conn: &Connection, id: i64, result: &DrinkResult) -> DbResult<()> {
        conn.execute(
            r#"
            UPDATE saved_drinks SET
                cached_start_volume_oz = ?1,
                cached_start_abv = ?2,
                cached_end_volume_oz = ?3,
                cached_end_abv = ?4,
                cached_kcal = ?5,
                cached_sugar = ?6,
                cached_carbs = ?7,
                cached_fat = ?8,
                cached_sodium = ?9,
                cached_prep_dilution_oz = ?10,
                cached_service_melt_oz = ?11,
                updated_at = datetime('now')
            WHERE id = ?12
            "#,
            params![
                result.start_volume_oz,
                result.start_abv,
                result.end_volume_oz,
                result.end_abv,
                result.total_kcal,
                result.sugar_g,
                result.carbs_g,
                result.fat_g,
                result.sodium_mg,
                result.prep_dilution_oz,
                result.service_melt_oz,
                id,
            ],
        )?;
        Ok(())
    }

    /// Delete a saved drink by name (case-insensitive)
    /// Returns Ok(false) if no drink had that name
    pub fn delete_by_name(conn: &Connection, name: &str) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM saved_drinks WHERE name_key = ?1",
            [normalize_name(name)],
        )?;
        Ok(rows > 0)
    }
}

/// Escape `LIKE` wildcards so a search term matches literally
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{AlcoholItem, MixerItem};

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn negroni() -> SavedDrinkCreate {
        SavedDrinkCreate {
            name: "Negroni".to_string(),
            recipe: RecipeConfig {
                alcohols: vec![
                    AlcoholItem::new("gin", 40.0, 1.0),
                    AlcoholItem::new("campari", 24.0, 1.0),
                    AlcoholItem::new("sweet vermouth", 16.0, 1.0),
                ],
                ..Default::default()
            },
            notes: None,
        }
    }

    fn result(kcal: f64) -> DrinkResult {
        DrinkResult { total_kcal: kcal, start_volume_oz: 3.0, end_volume_oz: 3.5, ..Default::default() }
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let conn = conn();
        let saved = SavedDrink::save(&conn, &negroni(), &result(200.0)).unwrap();
        assert_eq!(saved.name, "Negroni");
        assert_eq!(saved.recipe, negroni().recipe);
        assert_eq!(saved.cached_result.total_kcal, 200.0);

        let fetched = SavedDrink::get_by_name(&conn, "  NEGRONI ").unwrap().unwrap();
        assert_eq!(fetched.id, saved.id);
        assert_eq!(SavedDrink::get_by_id(&conn, saved.id).unwrap().unwrap().name, "Negroni");
    }

    #[test]
    fn test_save_same_name_overwrites() {
        let conn = conn();
        let first = SavedDrink::save(&conn, &negroni(), &result(200.0)).unwrap();

        let mut second = negroni();
        second.name = "negroni ".to_string();
        second.recipe.mixers.push(MixerItem::new("soda water", 2.0));
        second.notes = Some("sbagliato-ish".to_string());
        let updated = SavedDrink::save(&conn, &second, &result(210.0)).unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(updated.name, "negroni");
        assert_eq!(updated.recipe.mixers.len(), 1);
        assert_eq!(updated.cached_result.total_kcal, 210.0);
        assert_eq!(SavedDrink::count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_list_search_and_sort() {
        let conn = conn();
        SavedDrink::save(&conn, &negroni(), &result(200.0)).unwrap();
        let mut light = negroni();
        light.name = "Light Negroni".to_string();
        SavedDrink::save(&conn, &light, &result(120.0)).unwrap();
        let mut other = negroni();
        other.name = "Boulevardier".to_string();
        SavedDrink::save(&conn, &other, &result(230.0)).unwrap();

        let by_kcal = SavedDrink::list(&conn, None, "kcal", "asc", 10, 0).unwrap();
        let names: Vec<_> = by_kcal.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Light Negroni", "Negroni", "Boulevardier"]);

        let found = SavedDrink::list(&conn, Some("NEGRONI"), "name", "desc", 10, 0).unwrap();
        let names: Vec<_> = found.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Negroni", "Light Negroni"]);

        let paged = SavedDrink::list(&conn, None, "name", "asc", 1, 1).unwrap();
        assert_eq!(paged[0].name, "Light Negroni");
    }

    #[test]
    fn test_update_cached_result() {
        let conn = conn();
        let saved = SavedDrink::save(&conn, &negroni(), &result(200.0)).unwrap();
        SavedDrink::update_cached_result(&conn, saved.id, &result(190.0)).unwrap();
        let fetched = SavedDrink::get_by_id(&conn, saved.id).unwrap().unwrap();
        assert_eq!(fetched.cached_result.total_kcal, 190.0);
    }

    #[test]
    fn test_delete_by_name_any_casing() {
        let conn = conn();
        SavedDrink::save(&conn, &negroni(), &result(200.0)).unwrap();
        assert!(SavedDrink::delete_by_name(&conn, "NeGrOnI").unwrap());
        assert!(!SavedDrink::delete_by_name(&conn, "negroni").unwrap());
        assert!(SavedDrink::get_by_name(&conn, "negroni").unwrap().is_none());
    }

    #[test]
    fn test_list_search_treats_wildcards_literally() {
        let conn = conn();
        SavedDrink::save(&conn, &negroni(), &result(200.0)).unwrap();
        let mut odd = negroni();
        odd.name = "100% Agave_Sour".to_string();
        SavedDrink::save(&conn, &odd, &result(180.0)).unwrap();

        let underscore = SavedDrink::list(&conn, Some("_"), "name", "asc", 10, 0).unwrap();
        let names: Vec<_> = underscore.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["100% Agave_Sour"]);

        let percent = SavedDrink::list(&conn, Some("%"), "name", "asc", 10, 0).unwrap();
        assert_eq!(percent.len(), 1);

        assert!(SavedDrink::list(&conn, Some("0_a"), "name", "asc", 10, 0).unwrap().is_empty());
    }
}
