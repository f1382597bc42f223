//! Ingredient lookup
//!
//! Reports what the reference tables know about a name: the default ABV used
//! to auto-fill alcohol rows, and any per-ounce nutrition.

use serde::Serialize;

use super::normalize::normalize_name;
use super::tables::ReferenceTables;
use crate::models::Nutrition;

/// Which nutrition table an ingredient was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientKind {
    Liqueur,
    WineBeer,
    Mixer,
    /// Has a default ABV but no nutrition beyond ethanol
    Spirit,
}

/// Everything known about one ingredient name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientInfo {
    pub key: String,
    pub default_abv: Option<f64>,
    pub kind: Option<IngredientKind>,
    /// Non-ethanol nutrition per fluid ounce
    pub nutrition_per_oz: Option<Nutrition>,
}

impl IngredientInfo {
    pub fn is_known(&self) -> bool {
        self.default_abv.is_some() || self.kind.is_some()
    }
}

/// Look up an ingredient by name. An unknown name yields an empty record.
pub fn lookup_ingredient(name: &str, tables: &ReferenceTables) -> IngredientInfo {
    let key = normalize_name(name);
    let default_abv = tables.default_abv(&key);

    let (kind, nutrition_per_oz) = if let Some(n) = tables.liqueurs.get(&key) {
        (Some(IngredientKind::Liqueur), Some(*n))
    } else if let Some(n) = tables.wine_beer.get(&key) {
        (Some(IngredientKind::WineBeer), Some(*n))
    } else if let Some(m) = tables.mixers.get(&key) {
        (Some(IngredientKind::Mixer), Some(m.resolve()))
    } else if default_abv.is_some() {
        (Some(IngredientKind::Spirit), None)
    } else {
        (None, None)
    };

    IngredientInfo {
        key,
        default_abv,
        kind,
        nutrition_per_oz,
    }
}

/// Known ingredient names of one kind, sorted
pub fn known_names(kind: IngredientKind, tables: &ReferenceTables) -> Vec<String> {
    let mut names: Vec<String> = match kind {
        IngredientKind::Liqueur => tables.liqueurs.keys().cloned().collect(),
        IngredientKind::WineBeer => tables.wine_beer.keys().cloned().collect(),
        IngredientKind::Mixer => tables.mixers.keys().cloned().collect(),
        IngredientKind::Spirit => tables
            .alcohol_abv
            .keys()
            .filter(|k| !tables.liqueurs.contains_key(*k) && !tables.wine_beer.contains_key(*k))
            .cloned()
            .collect(),
    };
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_spirit() {
        let info = lookup_ingredient("Mezcal", ReferenceTables::builtin());
        assert_eq!(info.key, "mezcal");
        assert_eq!(info.default_abv, Some(42.0));
        assert_eq!(info.kind, Some(IngredientKind::Spirit));
        assert_eq!(info.nutrition_per_oz, None);
    }

    #[test]
    fn test_lookup_liqueur_has_abv_and_nutrition() {
        let info = lookup_ingredient("campari", ReferenceTables::builtin());
        assert_eq!(info.default_abv, Some(24.0));
        assert_eq!(info.kind, Some(IngredientKind::Liqueur));
        assert_eq!(info.nutrition_per_oz.unwrap().sugar, 9.0);
    }

    #[test]
    fn test_lookup_mixer_applies_carbs_fallback() {
        let info = lookup_ingredient("Simple Syrup", ReferenceTables::builtin());
        assert_eq!(info.kind, Some(IngredientKind::Mixer));
        let n = info.nutrition_per_oz.unwrap();
        assert_eq!(n.carbs, n.sugar);
    }

    #[test]
    fn test_lookup_unknown() {
        let info = lookup_ingredient("unobtainium", ReferenceTables::builtin());
        assert!(!info.is_known());
        assert_eq!(info.key, "unobtainium");
    }

    #[test]
    fn test_known_spirits_exclude_liqueurs() {
        let spirits = known_names(IngredientKind::Spirit, ReferenceTables::builtin());
        assert!(spirits.contains(&"gin".to_string()));
        assert!(!spirits.contains(&"campari".to_string()));
        assert!(!spirits.contains(&"lager".to_string()));
        assert!(spirits.windows(2).all(|w| w[0] <= w[1]));
    }
}
