//! Classic catalog and suggestion tools
//!
//! Browse the classic recipe catalog and filter classics and saved drinks by
//! strength, calories, and sugar.

use serde::Serialize;

use crate::catalog::{Catalog, ClassicRecipe};
use crate::db::Database;
use crate::engine::{calculate, suggest, RecipeFilter, ReferenceTables, Suggestion};
use crate::models::{DrinkResult, SavedDrink};

/// Classic summary for listing
#[derive(Debug, Serialize)]
pub struct ClassicSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_abv: f64,
    pub total_kcal: f64,
}

/// Response for list_classics
#[derive(Debug, Serialize)]
pub struct ListClassicsResponse {
    pub classics: Vec<ClassicSummary>,
    pub count: usize,
    pub source: String,
    pub loaded_at: String,
}

/// Response for get_classic
#[derive(Debug, Serialize)]
pub struct ClassicDetail {
    #[serde(flatten)]
    pub classic: ClassicRecipe,
    pub result: DrinkResult,
}

/// Which recipes suggest_recipes considers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    Classics,
    Saved,
    All,
}

impl SuggestionSource {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classics" | "classic" | "catalog" => Some(SuggestionSource::Classics),
            "saved" => Some(SuggestionSource::Saved),
            "all" | "" => Some(SuggestionSource::All),
            _ => None,
        }
    }

    fn includes_classics(self) -> bool {
        matches!(self, SuggestionSource::Classics | SuggestionSource::All)
    }

    fn includes_saved(self) -> bool {
        matches!(self, SuggestionSource::Saved | SuggestionSource::All)
    }
}

/// A suggestion tagged with where it came from
#[derive(Debug, Serialize)]
pub struct SuggestedRecipe {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub source: &'static str,
}

/// Response for suggest_recipes
#[derive(Debug, Serialize)]
pub struct SuggestRecipesResponse {
    pub suggestions: Vec<SuggestedRecipe>,
    pub count: usize,
    pub considered: usize,
}

/// List every classic with its calculated strength and calories
pub fn list_classics(catalog: &Catalog, tables: &ReferenceTables) -> ListClassicsResponse {
    let classics: Vec<ClassicSummary> = catalog
        .recipes
        .iter()
        .map(|c| {
            let result = calculate(&c.recipe, tables);
            ClassicSummary {
                name: c.name.clone(),
                description: c.description.clone(),
                start_abv: result.start_abv,
                total_kcal: result.total_kcal,
            }
        })
        .collect();

    ListClassicsResponse {
        count: classics.len(),
        classics,
        source: catalog.source.clone(),
        loaded_at: catalog.loaded_at.clone(),
    }
}

/// Get a classic by name with its calculated result
pub fn get_classic(catalog: &Catalog, tables: &ReferenceTables, name: &str) -> Option<ClassicDetail> {
    catalog.get(name).map(|classic| ClassicDetail {
        result: calculate(&classic.recipe, tables),
        classic: classic.clone(),
    })
}

/// Suggest recipes inside the filter bounds, lowest calories first
pub fn suggest_recipes(
    db: &Database,
    catalog: &Catalog,
    tables: &ReferenceTables,
    filter: &RecipeFilter,
    source: SuggestionSource,
    limit: usize,
) -> Result<SuggestRecipesResponse, String> {
    let saved = if source.includes_saved() {
        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
        SavedDrink::list_all(&conn).map_err(|e| format!("Failed to list drinks: {}", e))?
    } else {
        Vec::new()
    };

    let mut tagged: Vec<SuggestedRecipe> = Vec::new();
    let mut considered = 0;

    if source.includes_classics() {
        considered += catalog.len();
        tagged.extend(
            suggest(catalog.entries(), filter, tables)
                .into_iter()
                .map(|suggestion| SuggestedRecipe { suggestion, source: "classic" }),
        );
    }

    considered += saved.len();
    tagged.extend(
        suggest(saved.iter().map(|d| (d.name.as_str(), &d.recipe)), filter, tables)
            .into_iter()
            .map(|suggestion| SuggestedRecipe { suggestion, source: "saved" }),
    );

    // Merge the two sorted lists under the same ordering
    tagged.sort_by(|a, b| {
        a.suggestion
            .result
            .total_kcal
            .total_cmp(&b.suggestion.result.total_kcal)
            .then_with(|| a.suggestion.name.cmp(&b.suggestion.name))
    });
    tagged.truncate(limit.max(1));

    Ok(SuggestRecipesResponse {
        count: tagged.len(),
        suggestions: tagged,
        considered,
    })
}
