//! Classic recipe catalog
//!
//! A static list of named recipes loaded once at startup from a JSON file or
//! an http(s) URL. A catalog that cannot be read or parsed degrades to an
//! empty one; the failure is logged, never propagated to the caller of
//! [`load`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::normalize_name;
use crate::models::RecipeConfig;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Url(url) => url.clone(),
        }
    }
}

/// One catalog entry; recipe fields sit beside the name in the JSON record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicRecipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub recipe: RecipeConfig,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub recipes: Vec<ClassicRecipe>,
    pub source: String,
    pub loaded_at: String,
}

impl Catalog {
    pub fn empty(source: &CatalogSource) -> Self {
        Self {
            recipes: Vec::new(),
            source: source.describe(),
            loaded_at: now(),
        }
    }

    pub fn from_json(json: &str, source: &CatalogSource) -> Result<Self, CatalogError> {
        let recipes: Vec<ClassicRecipe> = serde_json::from_str(json)?;
        Ok(Self {
            recipes,
            source: source.describe(),
            loaded_at: now(),
        })
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Find a classic by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&ClassicRecipe> {
        let key = normalize_name(name);
        self.recipes.iter().find(|r| normalize_name(&r.name) == key)
    }

    /// `(name, recipe)` pairs for the suggestion filter
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RecipeConfig)> {
        self.recipes.iter().map(|r| (r.name.as_str(), &r.recipe))
    }
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Load the catalog, reporting any failure
///
/// URL sources use a blocking client; call from a blocking context.
pub fn try_load(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    let json = match source {
        CatalogSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(path.display().to_string(), e))?,
        CatalogSource::Url(url) => reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?
            .get(url)
            .send()?
            .error_for_status()?
            .text()?,
    };
    Catalog::from_json(&json, source)
}

/// Load the catalog, degrading to an empty catalog on failure
pub fn load(source: &CatalogSource) -> Catalog {
    match try_load(source) {
        Ok(catalog) => {
            tracing::info!("Loaded {} classic recipes from {}", catalog.len(), catalog.source);
            catalog
        }
        Err(e) => {
            tracing::warn!("Classic catalog unavailable ({}); continuing with an empty catalog", e);
            Catalog::empty(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IceType, PrepMethod};

    const SAMPLE: &str = r#"[
        {
            "name": "Daiquiri",
            "description": "Rum, lime, sugar",
            "alcohols": [{"name": "white rum", "abv": 40, "volume_oz": 2, "abv_is_user_specified": true}],
            "mixers": [
                {"name": "lime juice", "volume_oz": 1},
                {"name": "simple syrup", "volume_oz": 0.75}
            ],
            "prep_method": "shaken_neat",
            "glass": "coupe"
        },
        {
            "name": "Cuba Libre",
            "alcohols": [{"name": "rum", "volume_oz": 2}],
            "mixers": [{"name": "cola", "volume_oz": 4}],
            "prep_method": "built_over_ice",
            "ice_type": "small_cube",
            "glass": "highball",
            "ice_pieces": 10
        }
    ]"#;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("drinkcalc-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_parse_source() {
        assert_eq!(
            CatalogSource::parse(" https://example.com/classics.json "),
            CatalogSource::Url("https://example.com/classics.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse("data/classics.json"),
            CatalogSource::File(PathBuf::from("data/classics.json"))
        );
    }

    #[test]
    fn test_from_json_flattens_recipe_fields() {
        let source = CatalogSource::File(PathBuf::from("inline"));
        let catalog = Catalog::from_json(SAMPLE, &source).unwrap();
        assert_eq!(catalog.len(), 2);

        let daiquiri = catalog.get("DAIQUIRI").unwrap();
        assert_eq!(daiquiri.recipe.prep_method, PrepMethod::ShakenNeat);
        assert_eq!(daiquiri.recipe.mixers.len(), 2);
        assert_eq!(daiquiri.description.as_deref(), Some("Rum, lime, sugar"));

        let cuba = catalog.get("cuba libre").unwrap();
        assert_eq!(cuba.recipe.ice_type, IceType::SmallCube);
        assert_eq!(cuba.recipe.ice_pieces, Some(10));
        assert_eq!(cuba.recipe.alcohols[0].abv, None);
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path("valid");
        std::fs::write(&path, SAMPLE).unwrap();
        let catalog = load(&CatalogSource::File(path.clone()));
        std::fs::remove_file(&path).ok();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries().count(), 2);
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/drinkcalc/classics.json"));
        assert!(matches!(try_load(&source), Err(CatalogError::Io(_, _))));

        let catalog = load(&source);
        assert!(catalog.is_empty());
        assert_eq!(catalog.source, "/nonexistent/drinkcalc/classics.json");
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let path = temp_path("malformed");
        std::fs::write(&path, "{\"recipes\": ").unwrap();
        let source = CatalogSource::File(path.clone());
        let err = try_load(&source);
        let catalog = load(&source);
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, Err(CatalogError::Parse(_))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_shipped_catalog_parses() {
        let json = include_str!("../data/classics.json");
        let catalog = Catalog::from_json(json, &CatalogSource::File(PathBuf::from("data/classics.json"))).unwrap();
        assert!(catalog.len() >= 10);
        assert!(catalog.get("Gin & Tonic").is_some());
    }
}
