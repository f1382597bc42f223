//! Ingredient aggregation
//!
//! Folds a recipe's alcohol and mixer rows into pre-dilution totals. Rows
//! with a missing or invalid volume or ABV are skipped, not zero-filled, and so
//! are rows large enough to push a running total past the range of `f64`.

use serde::Serialize;

use super::tables::ReferenceTables;
use super::units::{oz_to_ml, KCAL_PER_G_SUGAR};
use crate::models::{AlcoholItem, MixerItem, Nutrition, RecipeConfig};

/// Pre-dilution totals for a recipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub pre_volume_oz: f64,
    /// Pure ethanol in milliliters
    pub alcohol_ml: f64,
    /// Non-ethanol nutrition from mixers, liqueurs, wines, and beers
    pub nutrition: Nutrition,
    pub alcohols_included: usize,
    pub mixers_included: usize,
}

impl Aggregate {
    /// Add one row's contribution, leaving the totals untouched if any would overflow
    fn try_add(&mut self, volume_oz: f64, alcohol_ml: f64, nutrition: Nutrition) -> bool {
        let pre_volume_oz = self.pre_volume_oz + volume_oz;
        let alcohol_ml = self.alcohol_ml + alcohol_ml;
        let nutrition = self.nutrition + nutrition;
        if !(pre_volume_oz.is_finite() && alcohol_ml.is_finite() && nutrition.is_finite()) {
            return false;
        }

        self.pre_volume_oz = pre_volume_oz;
        self.alcohol_ml = alcohol_ml;
        self.nutrition = nutrition;
        true
    }
}

/// A usable volume is finite and strictly positive
pub fn valid_volume(volume_oz: Option<f64>) -> Option<f64> {
    volume_oz.filter(|v| v.is_finite() && *v > 0.0)
}

fn valid_abv(abv: f64) -> Option<f64> {
    (abv.is_finite() && (0.0..=100.0).contains(&abv)).then_some(abv)
}

/// Effective ABV for an alcohol row
///
/// A user-specified ABV is used as given, including 0. Otherwise an empty or
/// zero ABV falls back to the default table for the item's name.
pub fn resolve_abv(item: &AlcoholItem, tables: &ReferenceTables) -> Option<f64> {
    let given = item.abv.filter(|a| a.is_finite());

    if item.abv_is_user_specified {
        return given.and_then(valid_abv);
    }

    match given {
        Some(abv) if abv > 0.0 => valid_abv(abv),
        _ => tables.default_abv(&item.name),
    }
}

/// Per-ounce nutrition for a mixer row, with any sugar override applied
///
/// The override shifts carbs and calories by the sugar difference so a known
/// mixer keeps its non-sugar carbs, and an unknown one reports
/// carbs = sugar and 4 kcal per gram.
pub fn mixer_per_oz(item: &MixerItem, tables: &ReferenceTables) -> Nutrition {
    let base = tables
        .mixer_nutrition(&item.name)
        .map(|m| m.resolve())
        .unwrap_or_default();

    match item.sugar_per_oz.filter(|s| s.is_finite() && *s >= 0.0) {
        Some(sugar) => {
            let delta = sugar - base.sugar;
            Nutrition {
                calories: (base.calories + delta * KCAL_PER_G_SUGAR).max(0.0),
                sugar,
                carbs: (base.carbs + delta).max(0.0),
                ..base
            }
        }
        None => base,
    }
}

/// Aggregate every usable row of a recipe
pub fn aggregate(recipe: &RecipeConfig, tables: &ReferenceTables) -> Aggregate {
    let mut totals = Aggregate::default();

    for item in &recipe.alcohols {
        let (Some(volume_oz), Some(abv)) = (valid_volume(item.volume_oz), resolve_abv(item, tables))
        else {
            tracing::debug!("Skipping incomplete alcohol row '{}'", item.name);
            continue;
        };

        let nutrition = tables
            .alcohol_nutrition(&item.name)
            .map(|per_oz| per_oz * volume_oz)
            .unwrap_or_default();
        let alcohol_ml = oz_to_ml(volume_oz) * abv / 100.0;
        if !totals.try_add(volume_oz, alcohol_ml, nutrition) {
            tracing::debug!("Skipping oversized alcohol row '{}'", item.name);
            continue;
        }
        totals.alcohols_included += 1;
    }

    for item in &recipe.mixers {
        let Some(volume_oz) = valid_volume(item.volume_oz) else {
            tracing::debug!("Skipping mixer row '{}' without a usable volume", item.name);
            continue;
        };

        let nutrition = mixer_per_oz(item, tables) * volume_oz;
        if !totals.try_add(volume_oz, 0.0, nutrition) {
            tracing::debug!("Skipping oversized mixer row '{}'", item.name);
            continue;
        }
        totals.mixers_included += 1;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::builtin()
    }

    #[test]
    fn test_resolve_abv_prefers_user_value() {
        let item = AlcoholItem { abv: Some(0.0), ..AlcoholItem::new("gin", 0.0, 1.0) };
        assert_eq!(resolve_abv(&item, tables()), Some(0.0));

        let item = AlcoholItem::new("gin", 47.0, 1.0);
        assert_eq!(resolve_abv(&item, tables()), Some(47.0));
    }

    #[test]
    fn test_resolve_abv_fills_default_when_empty_or_zero() {
        let item = AlcoholItem::with_default_abv("Bourbon", 2.0);
        assert_eq!(resolve_abv(&item, tables()), Some(45.0));

        let item = AlcoholItem { abv: Some(0.0), abv_is_user_specified: false, ..AlcoholItem::with_default_abv("rye", 2.0) };
        assert_eq!(resolve_abv(&item, tables()), Some(45.0));

        let item = AlcoholItem::with_default_abv("unobtainium", 2.0);
        assert_eq!(resolve_abv(&item, tables()), None);
    }

    #[test]
    fn test_resolve_abv_rejects_out_of_range() {
        let item = AlcoholItem::new("gin", 140.0, 1.0);
        assert_eq!(resolve_abv(&item, tables()), None);

        let item = AlcoholItem::new("gin", f64::NAN, 1.0);
        assert_eq!(resolve_abv(&item, tables()), None);
    }

    #[test]
    fn test_liqueur_adds_non_ethanol_nutrition() {
        let recipe = RecipeConfig {
            alcohols: vec![AlcoholItem::new("Triple Sec", 30.0, 1.0)],
            ..Default::default()
        };
        let agg = aggregate(&recipe, tables());
        assert_eq!(agg.nutrition.sugar, 8.0);
        assert_eq!(agg.nutrition.calories, 32.0);
    }

    #[test]
    fn test_unknown_alcohol_contributes_only_ethanol() {
        let recipe = RecipeConfig {
            alcohols: vec![AlcoholItem::new("unobtainium", 40.0, 1.0)],
            ..Default::default()
        };
        let agg = aggregate(&recipe, tables());
        assert_eq!(agg.pre_volume_oz, 1.0);
        assert!((agg.alcohol_ml - 29.5735 * 0.40).abs() < 1e-9);
        assert_eq!(agg.nutrition, Nutrition::zero());
        assert_eq!(agg.alcohols_included, 1);
    }

    #[test]
    fn test_excluded_rows_contribute_nothing() {
        let base = RecipeConfig {
            alcohols: vec![AlcoholItem::new("vodka", 40.0, 2.0)],
            mixers: vec![MixerItem::new("cola", 4.0)],
            ..Default::default()
        };
        let expected = aggregate(&base, tables());

        let mut polluted = base.clone();
        polluted.alcohols.push(AlcoholItem { volume_oz: Some(f64::NAN), ..AlcoholItem::new("rum", 40.0, 0.0) });
        polluted.alcohols.push(AlcoholItem::new("rum", 40.0, -1.0));
        polluted.alcohols.push(AlcoholItem { abv: None, ..AlcoholItem::new("unobtainium", 0.0, 1.0) });
        polluted.mixers.push(MixerItem { volume_oz: None, ..MixerItem::new("grenadine", 0.0) });
        polluted.mixers.push(MixerItem::new("grenadine", 0.0));

        assert_eq!(aggregate(&polluted, tables()), expected);
    }

    #[test]
    fn test_overflowing_rows_are_excluded() {
        let base = RecipeConfig {
            alcohols: vec![AlcoholItem::new("vodka", 40.0, 2.0)],
            mixers: vec![MixerItem::new("cola", 4.0)],
            ..Default::default()
        };
        let expected = aggregate(&base, tables());

        let mut huge = base.clone();
        huge.alcohols.push(AlcoholItem::new("vodka", 40.0, 1e308));
        huge.mixers.push(MixerItem::new("cola", f64::MAX));
        let agg = aggregate(&huge, tables());

        assert_eq!(agg, expected);
        assert!(agg.alcohol_ml.is_finite());
    }

    #[test]
    fn test_unknown_mixer_is_zero_nutrition() {
        let item = MixerItem::new("mystery juice", 2.0);
        assert_eq!(mixer_per_oz(&item, tables()), Nutrition::zero());
    }

    #[test]
    fn test_sugar_override_on_unknown_mixer() {
        let item = MixerItem { sugar_per_oz: Some(3.0), ..MixerItem::new("house cordial", 2.0) };
        let n = mixer_per_oz(&item, tables());
        assert_eq!(n.sugar, 3.0);
        assert_eq!(n.carbs, 3.0);
        assert_eq!(n.calories, 12.0);
    }

    #[test]
    fn test_sugar_override_keeps_non_sugar_carbs() {
        // lime juice: sugar 0.5, carbs 2.6, kcal 8
        let item = MixerItem { sugar_per_oz: Some(1.5), ..MixerItem::new("lime juice", 1.0) };
        let n = mixer_per_oz(&item, tables());
        assert_eq!(n.sugar, 1.5);
        assert!((n.carbs - 3.6).abs() < 1e-9);
        assert!((n.calories - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_sugar_override_is_ignored() {
        let item = MixerItem { sugar_per_oz: Some(-2.0), ..MixerItem::new("tonic", 1.0) };
        assert_eq!(mixer_per_oz(&item, tables()).sugar, 2.5);
    }
}
