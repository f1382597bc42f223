//! Two-stage dilution model
//!
//! Stage one is water picked up while mixing (prep). Stage two is ice melting
//! in the glass while the drink is consumed (service). Both are fractions of
//! the pre-dilution volume.

use serde::Serialize;

use super::tables::ReferenceTables;
use crate::models::{IceType, RecipeConfig};

/// Dilution fractions for a recipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dilution {
    pub prep_fraction: f64,
    pub service_fraction: f64,
    pub service_multiplier: f64,
}

impl Dilution {
    /// Volume as served
    pub fn start_volume(&self, pre_volume_oz: f64) -> f64 {
        pre_volume_oz * (1.0 + self.prep_fraction)
    }

    /// Volume after the ice has melted into the drink
    pub fn end_volume(&self, pre_volume_oz: f64) -> f64 {
        pre_volume_oz * (1.0 + self.prep_fraction + self.service_fraction)
    }
}

/// Scale service melt by the actual ice load relative to the glass's typical load
///
/// Melt grows with the square root of the piece count, so extra pieces add
/// water with diminishing returns. Without an override, or when the table has
/// no baseline, this is 1.
pub fn service_multiplier(recipe: &RecipeConfig, tables: &ReferenceTables) -> f64 {
    let baseline = match tables.ice_pieces(recipe.glass, recipe.ice_type) {
        Some(n) if n > 0 => n,
        _ => return 1.0,
    };
    let pieces = recipe.ice_pieces.unwrap_or(baseline);
    (pieces as f64 / baseline as f64).sqrt()
}

/// Compute both dilution stages for a recipe
pub fn dilution(recipe: &RecipeConfig, tables: &ReferenceTables) -> Dilution {
    let time = tables.time_factor(recipe.serving_time);
    let prep_fraction = tables.prep_fraction(recipe.prep_method) * time;
    let service_multiplier = service_multiplier(recipe, tables);
    // No ice in the glass means no melt, whatever the piece count or overlay says
    let service_fraction = if recipe.ice_type == IceType::None {
        0.0
    } else {
        tables.melt_fraction(recipe.ice_type) * time * service_multiplier
    };

    Dilution {
        prep_fraction,
        service_fraction,
        service_multiplier,
    }
}
