//! Drink calculator
//!
//! Combines aggregation and dilution into a [`DrinkResult`]. This is a pure
//! function of the recipe and the reference tables.

use super::aggregate::aggregate;
use super::dilution::dilution;
use super::tables::ReferenceTables;
use super::units::{ETHANOL_DENSITY_G_PER_ML, KCAL_PER_G_ETHANOL, ML_PER_FL_OZ};
use crate::models::{DrinkResult, RecipeConfig};

/// Percent ABV of `alcohol_ml` ethanol in `volume_oz` of liquid
///
/// Returns 0 for an empty drink and for any input that would not give a
/// finite percentage.
pub fn abv_percent(alcohol_ml: f64, volume_oz: f64) -> f64 {
    if !(alcohol_ml.is_finite() && volume_oz.is_finite()) || volume_oz <= 0.0 {
        return 0.0;
    }
    let abv = alcohol_ml / (volume_oz * ML_PER_FL_OZ) * 100.0;
    if abv.is_finite() { abv } else { 0.0 }
}

/// Calories from pure ethanol
pub fn ethanol_kcal(alcohol_ml: f64) -> f64 {
    alcohol_ml * ETHANOL_DENSITY_G_PER_ML * KCAL_PER_G_ETHANOL
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Calculate the served volume, strength, and nutrition of a drink
pub fn calculate(recipe: &RecipeConfig, tables: &ReferenceTables) -> DrinkResult {
    let totals = aggregate(recipe, tables);
    let stages = dilution(recipe, tables);
    let rim = tables.rim_additive(recipe.rim);

    // Dilution can still overflow a near-limit volume
    let start_volume_oz = finite_or(stages.start_volume(totals.pre_volume_oz), totals.pre_volume_oz);
    let end_volume_oz = finite_or(stages.end_volume(totals.pre_volume_oz), start_volume_oz);
    let nutrition = totals.nutrition + rim;

    DrinkResult {
        start_volume_oz,
        start_abv: abv_percent(totals.alcohol_ml, start_volume_oz),
        end_volume_oz,
        end_abv: abv_percent(totals.alcohol_ml, end_volume_oz),
        total_kcal: finite_or(ethanol_kcal(totals.alcohol_ml) + nutrition.calories, 0.0),
        sugar_g: nutrition.sugar,
        carbs_g: nutrition.carbs,
        fat_g: nutrition.fat,
        sodium_mg: nutrition.sodium,
        prep_dilution_oz: start_volume_oz - totals.pre_volume_oz,
        service_melt_oz: end_volume_oz - start_volume_oz,
    }
}
