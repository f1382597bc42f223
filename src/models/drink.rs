//! Drink recipe and result models
//!
//! `RecipeConfig` is the sole input to the calculator; `DrinkResult` is what
//! it produces. Numeric fields on line items are optional so an incomplete
//! row can be carried through and excluded instead of zero-filled.

use serde::{Deserialize, Serialize};

use super::serving::{Glass, IceType, PrepMethod, Rim, ServingTime};

/// One poured spirit, wine, beer, or liqueur
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlcoholItem {
    pub name: String,
    /// Percent alcohol by volume (0-100)
    #[serde(default)]
    pub abv: Option<f64>,
    #[serde(default)]
    pub volume_oz: Option<f64>,
    /// The user typed this ABV; never replace it with a table default
    #[serde(default)]
    pub abv_is_user_specified: bool,
}

impl AlcoholItem {
    pub fn new(name: impl Into<String>, abv: f64, volume_oz: f64) -> Self {
        Self {
            name: name.into(),
            abv: Some(abv),
            volume_oz: Some(volume_oz),
            abv_is_user_specified: true,
        }
    }

    /// An item whose ABV should come from the default table
    pub fn with_default_abv(name: impl Into<String>, volume_oz: f64) -> Self {
        Self {
            name: name.into(),
            abv: None,
            volume_oz: Some(volume_oz),
            abv_is_user_specified: false,
        }
    }
}

/// One non-alcoholic mixer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixerItem {
    pub name: String,
    #[serde(default)]
    pub volume_oz: Option<f64>,
    /// Grams of sugar per ounce, replacing the table value
    #[serde(default)]
    pub sugar_per_oz: Option<f64>,
}

impl MixerItem {
    pub fn new(name: impl Into<String>, volume_oz: f64) -> Self {
        Self {
            name: name.into(),
            volume_oz: Some(volume_oz),
            sugar_per_oz: None,
        }
    }
}

/// A complete drink recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeConfig {
    #[serde(default)]
    pub alcohols: Vec<AlcoholItem>,
    #[serde(default)]
    pub mixers: Vec<MixerItem>,
    #[serde(default)]
    pub prep_method: PrepMethod,
    #[serde(default)]
    pub ice_type: IceType,
    #[serde(default)]
    pub serving_time: ServingTime,
    #[serde(default)]
    pub glass: Glass,
    #[serde(default)]
    pub rim: Rim,
    /// Actual ice pieces in the glass, if different from the glass's typical load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_pieces: Option<u32>,
}

impl RecipeConfig {
    pub fn is_empty(&self) -> bool {
        self.alcohols.is_empty() && self.mixers.is_empty()
    }
}

/// Calculated volume, strength, and nutrition of a served drink
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrinkResult {
    /// As served, after preparation dilution
    pub start_volume_oz: f64,
    pub start_abv: f64,
    /// After ice melt in the glass
    pub end_volume_oz: f64,
    pub end_abv: f64,
    pub total_kcal: f64,
    pub sugar_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub sodium_mg: f64,
    #[serde(default)]
    pub prep_dilution_oz: f64,
    #[serde(default)]
    pub service_melt_oz: f64,
}
