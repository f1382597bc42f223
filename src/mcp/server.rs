//! Drinkcalc MCP Server Implementation
//!
//! Implements the MCP server with all drink calculator tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::db::Database;
use crate::engine::{to_fl_oz, RecipeFilter, ReferenceTables};
use crate::models::{
    AlcoholItem, Glass, IceType, MixerItem, PrepMethod, RecipeConfig, Rim, SavedDrink, ServingTime,
};
use crate::tools::classics::{self, SuggestionSource};
use crate::tools::drinks;
use crate::tools::saved;
use crate::tools::status::StatusTracker;

/// Drinkcalc MCP Service
#[derive(Clone)]
pub struct DrinkService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tables: Arc<ReferenceTables>,
    catalog: Arc<Catalog>,
    tool_router: ToolRouter<DrinkService>,
}

impl DrinkService {
    pub fn new(database_path: PathBuf, database: Database, tables: ReferenceTables, catalog: Catalog) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tables: Arc::new(tables),
            catalog: Arc::new(catalog),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(what: &str, name: &str) -> Result<CallToolResult, McpError> {
    to_json(&serde_json::json!({ "error": format!("{} not found", what), "name": name }))
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct AlcoholParam {
    /// Spirit, liqueur, wine, or beer name (e.g. "gin", "campari")
    pub name: String,
    /// Percent ABV. Omit to use the default for a known name.
    pub abv: Option<f64>,
    pub volume: Option<f64>,
    /// oz (default), ml, cl, l, tsp, tbsp, barspoon, dash, shot, jigger, cup
    pub unit: Option<String>,
    /// Use `abv` exactly as given, even 0. Defaults to true when abv > 0.
    pub abv_is_user_specified: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct MixerParam {
    pub name: String,
    pub volume: Option<f64>,
    pub unit: Option<String>,
    /// Grams of sugar per ounce, replacing the table value
    pub sugar_per_oz: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct RecipeParams {
    #[serde(default)]
    pub alcohols: Vec<AlcoholParam>,
    #[serde(default)]
    pub mixers: Vec<MixerParam>,
    /// shaken_neat, shaken_over_ice, stirred_neat, stirred_over_ice, built_over_ice, built_neat, built_neat_served_ice
    pub prep_method: Option<String>,
    /// crushed, small_cube, large_cube, top_hat, none
    pub ice_type: Option<String>,
    /// shot, sipped, nursed
    pub serving_time: Option<String>,
    /// rocks, highball, collins, coupe, martini, nick_and_nora, wine, flute, pint, copper_mug, hurricane, shot
    pub glass: Option<String>,
    /// none, sugar, salt, tajin, cinnamon_sugar
    pub rim: Option<String>,
    /// Actual ice pieces in the glass, if not a normally filled glass
    pub ice_pieces: Option<u32>,
}

/// Convert a quantity in `unit` to fluid ounces; an unknown unit drops the quantity
fn volume_oz(volume: Option<f64>, unit: Option<&str>) -> Option<f64> {
    volume.and_then(|q| to_fl_oz(q, unit.unwrap_or("")))
}

impl From<AlcoholParam> for AlcoholItem {
    fn from(p: AlcoholParam) -> Self {
        let abv_is_user_specified = p
            .abv_is_user_specified
            .unwrap_or(matches!(p.abv, Some(a) if a > 0.0));
        AlcoholItem {
            volume_oz: volume_oz(p.volume, p.unit.as_deref()),
            name: p.name,
            abv: p.abv,
            abv_is_user_specified,
        }
    }
}

impl From<MixerParam> for MixerItem {
    fn from(p: MixerParam) -> Self {
        MixerItem {
            volume_oz: volume_oz(p.volume, p.unit.as_deref()),
            name: p.name,
            sugar_per_oz: p.sugar_per_oz,
        }
    }
}

impl From<RecipeParams> for RecipeConfig {
    fn from(p: RecipeParams) -> Self {
        RecipeConfig {
            alcohols: p.alcohols.into_iter().map(AlcoholItem::from).collect(),
            mixers: p.mixers.into_iter().map(MixerItem::from).collect(),
            prep_method: p.prep_method.as_deref().map(PrepMethod::from_str).unwrap_or_default(),
            ice_type: p.ice_type.as_deref().map(IceType::from_str).unwrap_or_default(),
            serving_time: p.serving_time.as_deref().map(ServingTime::from_str).unwrap_or_default(),
            glass: p.glass.as_deref().map(Glass::from_str).unwrap_or_default(),
            rim: p.rim.as_deref().map(Rim::from_str).unwrap_or_default(),
            ice_pieces: p.ice_pieces,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveDrinkParams {
    pub name: String,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub recipe: RecipeParams,
}

// ============================================================================
// Lookup / Listing Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NameParams {
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSavedDrinksParams {
    /// Case-insensitive name search
    pub query: Option<String>,
    /// name, kcal, abv, created_at, updated_at
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_sort_by() -> String { "name".to_string() }
fn default_sort_order() -> String { "asc".to_string() }
fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestRecipesParams {
    pub name_contains: Option<String>,
    /// Bounds on the as-served ABV (percent)
    pub min_abv: Option<f64>,
    pub max_abv: Option<f64>,
    pub min_kcal: Option<f64>,
    pub max_kcal: Option<f64>,
    pub max_sugar_g: Option<f64>,
    /// classics, saved, or all
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_suggest_limit")]
    pub limit: usize,
}

fn default_source() -> String { "all".to_string() }
fn default_suggest_limit() -> usize { 10 }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl DrinkService {
    // --- Status ---

    #[tool(description = "Get the current status of the drinkcalc service including build info, database and catalog status, and process information")]
    async fn drinkcalc_status(&self) -> Result<CallToolResult, McpError> {
        let saved_drinks = self
            .database
            .with_conn(SavedDrink::count)
            .map_err(|e| tracing::warn!("Could not count saved drinks: {}", e))
            .ok();
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.catalog, saved_drinks);
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for describing drinks: units, ABV defaults, dilution options, and saved drinks. Call this when unsure how to use the drink tools.")]
    fn drink_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::DRINK_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(DRINK_INSTRUCTIONS)]))
    }

    // --- Calculation ---

    #[tool(description = "Calculate a drink's volume and ABV as served and after ice melt, plus calories, sugar, carbs, fat, and sodium")]
    fn calculate_drink(&self, Parameters(p): Parameters<RecipeParams>) -> Result<CallToolResult, McpError> {
        let recipe = RecipeConfig::from(p);
        to_json(&drinks::calculate_drink(&self.tables, &recipe))
    }

    #[tool(description = "Look up an ingredient's default ABV and per-ounce nutrition by name")]
    fn lookup_ingredient(&self, Parameters(p): Parameters<NameParams>) -> Result<CallToolResult, McpError> {
        to_json(&drinks::lookup_ingredient(&self.tables, &p.name))
    }

    // --- Saved Drinks ---

    #[tool(description = "Calculate a drink and save it by name. Saving an existing name (any casing) replaces it.")]
    fn save_drink(&self, Parameters(p): Parameters<SaveDrinkParams>) -> Result<CallToolResult, McpError> {
        let result = saved::save_drink(&self.database, &self.tables, &p.name, p.recipe.into(), p.notes)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a saved drink with its recipe and cached result")]
    fn get_saved_drink(&self, Parameters(p): Parameters<NameParams>) -> Result<CallToolResult, McpError> {
        let result = saved::get_saved_drink(&self.database, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(drink) => to_json(&drink),
            None => not_found("Saved drink", &p.name),
        }
    }

    #[tool(description = "List saved drinks with optional name search, sorting, and pagination")]
    fn list_saved_drinks(&self, Parameters(p): Parameters<ListSavedDrinksParams>) -> Result<CallToolResult, McpError> {
        let result = saved::list_saved_drinks(&self.database, p.query.as_deref(), &p.sort_by, &p.sort_order, p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a saved drink by name (case-insensitive)")]
    fn delete_saved_drink(&self, Parameters(p): Parameters<NameParams>) -> Result<CallToolResult, McpError> {
        let result = saved::delete_saved_drink(&self.database, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(deleted) => to_json(&deleted),
            None => not_found("Saved drink", &p.name),
        }
    }

    #[tool(description = "Recompute every saved drink with the current reference tables and refresh cached results")]
    fn recalculate_saved_drinks(&self) -> Result<CallToolResult, McpError> {
        let result = saved::recalculate_saved_drinks(&self.database, &self.tables)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Classics ---

    #[tool(description = "List the classic cocktail catalog with each drink's ABV and calories")]
    fn list_classics(&self) -> Result<CallToolResult, McpError> {
        to_json(&classics::list_classics(&self.catalog, &self.tables))
    }

    #[tool(description = "Get a classic cocktail's recipe and calculated result")]
    fn get_classic(&self, Parameters(p): Parameters<NameParams>) -> Result<CallToolResult, McpError> {
        match classics::get_classic(&self.catalog, &self.tables, &p.name) {
            Some(detail) => to_json(&detail),
            None => not_found("Classic", &p.name),
        }
    }

    #[tool(description = "Suggest classics and/or saved drinks within ABV, calorie, and sugar bounds, lowest calories first")]
    fn suggest_recipes(&self, Parameters(p): Parameters<SuggestRecipesParams>) -> Result<CallToolResult, McpError> {
        let source = SuggestionSource::from_str(&p.source).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown source '{}': use classics, saved, or all", p.source), None)
        })?;
        let filter = RecipeFilter {
            name_contains: p.name_contains,
            min_abv: p.min_abv,
            max_abv: p.max_abv,
            min_kcal: p.min_kcal,
            max_kcal: p.max_kcal,
            max_sugar_g: p.max_sugar_g,
        };
        let result = classics::suggest_recipes(&self.database, &self.catalog, &self.tables, &filter, source, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for DrinkService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "drinkcalc".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Drink Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Drink Calculator (drinkcalc) - cocktail ABV, dilution, and nutrition estimates. \
                 IMPORTANT: Call drink_instructions for units, ABV defaults, and serving options. \
                 Calculate: calculate_drink, lookup_ingredient. \
                 Saved drinks: save_drink/get_saved_drink/list_saved_drinks/delete_saved_drink, recalculate_saved_drinks. \
                 Classics: list_classics/get_classic. \
                 Find drinks by strength, calories, or sugar: suggest_recipes."
                    .into(),
            ),
        }
    }
}
