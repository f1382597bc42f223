//! Drink calculation tools
//!
//! Stateless tools: run the calculator over a recipe, and look up what the
//! reference tables know about an ingredient name.

use serde::Serialize;

use crate::engine::{
    aggregate, calculate, dilution, known_names, lookup_ingredient as lookup, IngredientInfo,
    IngredientKind, ReferenceTables,
};
use crate::models::{DrinkResult, RecipeConfig};

/// Response for calculate_drink
#[derive(Debug, Serialize)]
pub struct CalculateDrinkResponse {
    pub result: DrinkResult,
    /// Volume of the included rows before any dilution
    pub pre_dilution_volume_oz: f64,
    pub alcohol_ml: f64,
    pub prep_fraction: f64,
    pub service_fraction: f64,
    pub alcohols_included: usize,
    pub alcohols_excluded: usize,
    pub mixers_included: usize,
    pub mixers_excluded: usize,
}

/// Response for lookup_ingredient
#[derive(Debug, Serialize)]
pub struct LookupIngredientResponse {
    #[serde(flatten)]
    pub info: IngredientInfo,
    pub known: bool,
    /// Known names containing the query, when the name itself is unknown
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub similar: Vec<String>,
}

/// Calculate a drink and report which rows were counted
pub fn calculate_drink(tables: &ReferenceTables, recipe: &RecipeConfig) -> CalculateDrinkResponse {
    let result = calculate(recipe, tables);
    let totals = aggregate(recipe, tables);
    let stages = dilution(recipe, tables);

    CalculateDrinkResponse {
        result,
        pre_dilution_volume_oz: totals.pre_volume_oz,
        alcohol_ml: totals.alcohol_ml,
        prep_fraction: stages.prep_fraction,
        service_fraction: stages.service_fraction,
        alcohols_included: totals.alcohols_included,
        alcohols_excluded: recipe.alcohols.len() - totals.alcohols_included,
        mixers_included: totals.mixers_included,
        mixers_excluded: recipe.mixers.len() - totals.mixers_included,
    }
}

/// Look up an ingredient's default ABV and per-ounce nutrition
pub fn lookup_ingredient(tables: &ReferenceTables, name: &str) -> LookupIngredientResponse {
    let info = lookup(name, tables);
    let known = info.is_known();

    let similar = if known || info.key.is_empty() {
        Vec::new()
    } else {
        let mut names: Vec<String> = [
            IngredientKind::Spirit,
            IngredientKind::Liqueur,
            IngredientKind::WineBeer,
            IngredientKind::Mixer,
        ]
        .into_iter()
        .flat_map(|kind| known_names(kind, tables))
        .filter(|n| n.contains(&info.key))
        .collect();
        names.sort();
        names.dedup();
        names
    };

    LookupIngredientResponse { info, known, similar }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlcoholItem, MixerItem};

    #[test]
    fn test_calculate_drink_counts_excluded_rows() {
        let recipe = RecipeConfig {
            alcohols: vec![
                AlcoholItem::new("gin", 40.0, 1.5),
                AlcoholItem {
                    name: "mystery".to_string(),
                    abv: Some(40.0),
                    volume_oz: None,
                    abv_is_user_specified: true,
                },
            ],
            mixers: vec![MixerItem::new("tonic", 3.0), MixerItem::new("soda water", -1.0)],
            ..Default::default()
        };

        let response = calculate_drink(ReferenceTables::builtin(), &recipe);
        assert_eq!(response.alcohols_included, 1);
        assert_eq!(response.alcohols_excluded, 1);
        assert_eq!(response.mixers_included, 1);
        assert_eq!(response.mixers_excluded, 1);
        assert!((response.pre_dilution_volume_oz - 4.5).abs() < 1e-9);
        assert_eq!(response.result, calculate(&recipe, ReferenceTables::builtin()));
    }

    #[test]
    fn test_lookup_known_spirit() {
        let response = lookup_ingredient(ReferenceTables::builtin(), "  Vodka ");
        assert!(response.known);
        assert_eq!(response.info.key, "vodka");
        assert_eq!(response.info.default_abv, Some(40.0));
        assert!(response.similar.is_empty());
    }

    #[test]
    fn test_lookup_unknown_suggests_similar_names() {
        let response = lookup_ingredient(ReferenceTables::builtin(), "TONI");
        assert!(!response.known);
        assert!(response.similar.iter().any(|n| n == "tonic"));

        let nothing = lookup_ingredient(ReferenceTables::builtin(), "unobtainium");
        assert!(!nothing.known);
        assert!(nothing.similar.is_empty());
    }
}
