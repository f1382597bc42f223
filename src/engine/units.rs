//! Unit constants and conversions
//!
//! The calculator works in US fluid ounces throughout. Tool inputs may carry
//! other bar units; they are converted here before a recipe is built.

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per fluid ounce (US)
pub const ML_PER_FL_OZ: f64 = 29.5735;
pub const ML_PER_TSP: f64 = 4.92892;
pub const ML_PER_TBSP: f64 = 14.7868;
pub const ML_PER_CL: f64 = 10.0;
pub const ML_PER_LITER: f64 = 1000.0;
pub const ML_PER_CUP: f64 = 236.588;
/// Bar spoon, conventionally 1/6 oz
pub const ML_PER_BARSPOON: f64 = ML_PER_FL_OZ / 6.0;
/// Dash, conventionally 1/32 oz
pub const ML_PER_DASH: f64 = ML_PER_FL_OZ / 32.0;
/// US shot, 1.5 oz
pub const ML_PER_SHOT: f64 = ML_PER_FL_OZ * 1.5;
/// Double-sided jigger, large side, 2 oz
pub const ML_PER_JIGGER: f64 = ML_PER_FL_OZ * 2.0;

// ============================================================================
// Energy Constants
// ============================================================================

/// Density of ethanol in g/ml
pub const ETHANOL_DENSITY_G_PER_ML: f64 = 0.789;
/// Energy of ethanol in kcal/g
pub const KCAL_PER_G_ETHANOL: f64 = 7.0;
/// Energy of sugar in kcal/g
pub const KCAL_PER_G_SUGAR: f64 = 4.0;

/// Convert fluid ounces to milliliters
pub fn oz_to_ml(oz: f64) -> f64 {
    oz * ML_PER_FL_OZ
}

/// Get the conversion factor to milliliters for a bar volume unit
pub fn ml_per_unit(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "oz" | "fl oz" | "floz" | "ounce" | "ounces" | "fluid ounce" | "fluid ounces" => {
            Some(ML_PER_FL_OZ)
        }
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some(1.0),
        "cl" | "centiliter" | "centiliters" | "centilitre" | "centilitres" => Some(ML_PER_CL),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(ML_PER_LITER),
        "tsp" | "teaspoon" | "teaspoons" => Some(ML_PER_TSP),
        "tbsp" | "tablespoon" | "tablespoons" => Some(ML_PER_TBSP),
        "barspoon" | "barspoons" | "bar spoon" | "bar spoons" => Some(ML_PER_BARSPOON),
        "dash" | "dashes" => Some(ML_PER_DASH),
        "shot" | "shots" => Some(ML_PER_SHOT),
        "jigger" | "jiggers" => Some(ML_PER_JIGGER),
        "cup" | "cups" => Some(ML_PER_CUP),
        _ => None,
    }
}

/// Convert a quantity in the given unit to fluid ounces
///
/// An empty unit means ounces. Returns None for unrecognized units, which
/// callers treat as an invalid (excluded) quantity.
pub fn to_fl_oz(quantity: f64, unit: &str) -> Option<f64> {
    if unit.trim().is_empty() {
        return Some(quantity);
    }
    ml_per_unit(unit).map(|ml| quantity * ml / ML_PER_FL_OZ)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ml_per_unit() {
        assert_eq!(ml_per_unit("oz"), Some(ML_PER_FL_OZ));
        assert_eq!(ml_per_unit("ML"), Some(1.0));
        assert_eq!(ml_per_unit(" tbsp "), Some(ML_PER_TBSP));
        assert_eq!(ml_per_unit("g"), None);
        assert_eq!(ml_per_unit("pinch"), None);
    }

    #[test]
    fn test_to_fl_oz() {
        let oz = to_fl_oz(30.0, "ml").unwrap();
        assert!((oz - 1.0144).abs() < 0.001);

        assert_eq!(to_fl_oz(2.0, ""), Some(2.0));
        assert_eq!(to_fl_oz(2.0, "oz"), Some(2.0));
        assert!((to_fl_oz(1.0, "shot").unwrap() - 1.5).abs() < 1e-9);
        assert!((to_fl_oz(3.0, "cl").unwrap() - 1.01442).abs() < 0.001);
        assert_eq!(to_fl_oz(1.0, "handful"), None);
    }

    #[test]
    fn test_ethanol_kcal_per_ml() {
        let kcal_per_ml = ETHANOL_DENSITY_G_PER_ML * KCAL_PER_G_ETHANOL;
        assert!((kcal_per_ml - 5.523).abs() < 1e-9);
    }
}
