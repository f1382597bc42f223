//! Reference tables
//!
//! Immutable lookup data the calculator is parameterized by: default ABVs,
//! per-ounce nutrition for liqueurs, wines/beers and mixers, dilution
//! fractions, ice loads per glass, and rim additives.
//!
//! A built-in set ships with the crate. A JSON overlay file may replace any
//! individual table; tables missing from the overlay keep their built-in
//! contents.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::normalize::normalize_name;
use crate::models::{Glass, IceType, Nutrition, PrepMethod, Rim, ServingTime};

/// Reference table loading errors
#[derive(Debug, Error)]
pub enum TablesError {
    #[error("Failed to read tables file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to parse tables file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid table entry: {0}")]
    Invalid(String),
}

/// Per-ounce mixer nutrition as stored in the table
///
/// `carbs` is optional: entries without explicit carbs report carbs equal to
/// sugar, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MixerNutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub sugar: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub sodium: f64,
}

impl MixerNutrition {
    /// Resolve to a full per-ounce [`Nutrition`], applying the carbs fallback
    pub fn resolve(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            sugar: self.sugar,
            carbs: self.carbs.unwrap_or(self.sugar),
            fat: self.fat,
            sodium: self.sodium,
        }
    }
}

/// All reference data used by the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    /// Normalized name -> default ABV percent
    pub alcohol_abv: HashMap<String, f64>,
    /// Normalized name -> non-ethanol nutrition per ounce
    pub liqueurs: HashMap<String, Nutrition>,
    pub wine_beer: HashMap<String, Nutrition>,
    pub mixers: HashMap<String, MixerNutrition>,
    pub prep_dilution: HashMap<PrepMethod, f64>,
    pub service_melt: HashMap<IceType, f64>,
    pub time_multiplier: HashMap<ServingTime, f64>,
    /// Typical ice pieces in a packed glass
    pub glass_ice_pieces: HashMap<Glass, HashMap<IceType, u32>>,
    /// Whole-drink additive for a rim (not per ounce)
    pub rims: HashMap<Rim, Nutrition>,
}

static BUILTIN: LazyLock<ReferenceTables> = LazyLock::new(ReferenceTables::build_builtin);

impl Default for ReferenceTables {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// Non-ethanol nutrition for a per-ounce entry without fat or sodium
fn per_oz(calories: f64, sugar: f64, carbs: f64) -> Nutrition {
    Nutrition { calories, sugar, carbs, fat: 0.0, sodium: 0.0 }
}

fn mixer(calories: f64, sugar: f64, carbs: Option<f64>, fat: f64, sodium: f64) -> MixerNutrition {
    MixerNutrition { calories, sugar, carbs, fat, sodium }
}

impl ReferenceTables {
    /// The built-in tables
    pub fn builtin() -> &'static ReferenceTables {
        &BUILTIN
    }

    fn build_builtin() -> Self {
        let alcohol_abv = [
            ("vodka", 40.0), ("gin", 40.0), ("rum", 40.0), ("white rum", 40.0),
            ("dark rum", 40.0), ("overproof rum", 75.5), ("tequila", 40.0),
            ("whisky", 40.0), ("whiskey", 40.0), ("bourbon", 45.0), ("rye", 45.0),
            ("scotch", 40.0), ("mezcal", 42.0), ("cognac", 40.0), ("brandy", 40.0),
            ("aperol", 11.0), ("campari", 24.0), ("triple sec", 30.0),
            ("amaretto", 28.0), ("coffee liqueur", 20.0), ("irish cream", 17.0),
            ("sweet vermouth", 16.0), ("dry vermouth", 18.0),
            ("light lager", 4.2), ("lager", 5.0), ("stout", 6.0), ("ipa", 6.5),
            ("red wine", 13.5), ("white wine", 12.0), ("prosecco", 11.0),
            ("champagne", 12.0),
        ];

        let liqueurs = [
            ("triple sec", per_oz(32.0, 8.0, 8.0)),
            ("amaretto", per_oz(44.0, 11.0, 11.0)),
            ("coffee liqueur", per_oz(44.0, 11.0, 11.0)),
            ("irish cream", per_oz(40.0, 6.0, 6.5)),
            ("aperol", per_oz(28.0, 7.0, 7.0)),
            ("campari", per_oz(36.0, 9.0, 9.0)),
            ("sweet vermouth", per_oz(16.0, 4.0, 4.0)),
            ("dry vermouth", per_oz(4.0, 1.0, 1.0)),
        ];

        let wine_beer = [
            ("light lager", per_oz(2.2, 0.0, 0.5)),
            ("lager", per_oz(4.0, 0.0, 1.1)),
            ("stout", per_oz(6.5, 0.0, 1.5)),
            ("ipa", per_oz(5.5, 0.0, 1.3)),
            ("red wine", per_oz(3.2, 0.2, 0.8)),
            ("white wine", per_oz(3.2, 0.3, 0.8)),
            ("prosecco", per_oz(4.0, 0.4, 1.0)),
            ("champagne", per_oz(3.6, 0.4, 0.9)),
        ];

        let mixers = [
            ("tonic", mixer(10.0, 2.5, Some(3.0), 0.0, 5.0)),
            ("tonic water", mixer(10.0, 2.5, Some(3.0), 0.0, 5.0)),
            ("cola", mixer(12.0, 3.3, None, 0.0, 1.3)),
            ("lemon-lime soda", mixer(12.0, 3.2, None, 0.0, 3.0)),
            ("ginger beer", mixer(13.0, 3.2, Some(3.3), 0.0, 2.0)),
            ("ginger ale", mixer(10.0, 2.7, None, 0.0, 2.0)),
            ("club soda", mixer(0.0, 0.0, Some(0.0), 0.0, 6.0)),
            ("soda water", mixer(0.0, 0.0, Some(0.0), 0.0, 6.0)),
            ("water", mixer(0.0, 0.0, Some(0.0), 0.0, 0.0)),
            ("orange juice", mixer(14.0, 2.6, Some(3.3), 0.1, 0.3)),
            ("oj", mixer(14.0, 2.6, Some(3.3), 0.1, 0.3)),
            ("cranberry juice", mixer(17.0, 3.8, Some(4.2), 0.0, 0.6)),
            ("pineapple juice", mixer(16.0, 3.1, Some(4.0), 0.0, 0.3)),
            ("grapefruit juice", mixer(12.0, 2.8, Some(2.9), 0.0, 0.3)),
            ("lime juice", mixer(8.0, 0.5, Some(2.6), 0.0, 0.6)),
            ("lemon juice", mixer(7.0, 0.8, Some(2.1), 0.0, 0.3)),
            ("simple syrup", mixer(50.0, 12.5, None, 0.0, 0.0)),
            ("rich simple syrup", mixer(75.0, 19.0, None, 0.0, 0.0)),
            ("grenadine", mixer(80.0, 19.0, Some(20.0), 0.0, 8.0)),
            ("cream of coconut", mixer(110.0, 16.0, Some(17.0), 5.0, 10.0)),
            ("heavy cream", mixer(100.0, 0.8, None, 11.0, 11.0)),
            ("milk", mixer(18.0, 1.5, None, 1.0, 13.0)),
            ("tomato juice", mixer(5.0, 1.0, Some(1.3), 0.0, 80.0)),
            ("espresso", mixer(1.0, 0.0, Some(0.2), 0.0, 2.0)),
        ];

        let prep_dilution = [
            (PrepMethod::ShakenNeat, 0.17),
            (PrepMethod::ShakenOverIce, 0.20),
            (PrepMethod::StirredNeat, 0.12),
            (PrepMethod::StirredOverIce, 0.15),
            (PrepMethod::BuiltOverIce, 0.10),
            (PrepMethod::BuiltNeat, 0.0),
            (PrepMethod::BuiltNeatServedIce, 0.10),
        ];

        let service_melt = [
            (IceType::Crushed, 0.30),
            (IceType::SmallCube, 0.20),
            (IceType::LargeCube, 0.12),
            (IceType::TopHat, 0.08),
            (IceType::None, 0.0),
        ];

        let time_multiplier = [
            (ServingTime::Shot, 0.9),
            (ServingTime::Sipped, 1.0),
            (ServingTime::Nursed, 1.1),
        ];

        // crushed, small_cube, large_cube, top_hat
        let ice_rows: [(Glass, [u32; 4]); 12] = [
            (Glass::Rocks, [30, 8, 1, 1]),
            (Glass::Highball, [45, 12, 3, 1]),
            (Glass::Collins, [50, 14, 3, 1]),
            (Glass::Coupe, [15, 3, 1, 1]),
            (Glass::Martini, [15, 3, 1, 1]),
            (Glass::NickAndNora, [12, 2, 1, 1]),
            (Glass::Wine, [35, 8, 2, 1]),
            (Glass::Flute, [10, 3, 1, 1]),
            (Glass::Pint, [60, 16, 4, 1]),
            (Glass::CopperMug, [45, 10, 2, 1]),
            (Glass::Hurricane, [70, 18, 4, 1]),
            (Glass::Shot, [5, 1, 1, 1]),
        ];

        let rims = [
            (Rim::None, Nutrition::zero()),
            (Rim::Sugar, Nutrition { calories: 16.0, sugar: 4.0, carbs: 4.0, fat: 0.0, sodium: 0.0 }),
            (Rim::Salt, Nutrition { calories: 0.0, sugar: 0.0, carbs: 0.0, fat: 0.0, sodium: 300.0 }),
            (Rim::Tajin, Nutrition { calories: 2.0, sugar: 0.0, carbs: 0.5, fat: 0.0, sodium: 190.0 }),
            (Rim::CinnamonSugar, Nutrition { calories: 17.0, sugar: 4.0, carbs: 4.5, fat: 0.0, sodium: 0.0 }),
        ];

        Self {
            alcohol_abv: alcohol_abv.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            liqueurs: liqueurs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            wine_beer: wine_beer.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            mixers: mixers.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            prep_dilution: prep_dilution.into_iter().collect(),
            service_melt: service_melt.into_iter().collect(),
            time_multiplier: time_multiplier.into_iter().collect(),
            glass_ice_pieces: ice_rows
                .into_iter()
                .map(|(glass, [crushed, small, large, top_hat])| {
                    let row = HashMap::from([
                        (IceType::Crushed, crushed),
                        (IceType::SmallCube, small),
                        (IceType::LargeCube, large),
                        (IceType::TopHat, top_hat),
                        (IceType::None, 0),
                    ]);
                    (glass, row)
                })
                .collect(),
            rims: rims.into_iter().collect(),
        }
    }

    /// Parse an overlay from JSON text. Name keys are normalized.
    pub fn from_json(json: &str) -> Result<Self, TablesError> {
        let tables: ReferenceTables = serde_json::from_str(json)?;
        let tables = tables.normalized();
        tables.validate()?;
        Ok(tables)
    }

    /// Load an overlay file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TablesError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TablesError::Io(path.display().to_string(), e))?;
        Self::from_json(&json)
    }

    fn normalized(self) -> Self {
        fn keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
            map.into_iter().map(|(k, v)| (normalize_name(&k), v)).collect()
        }
        Self {
            alcohol_abv: keys(self.alcohol_abv),
            liqueurs: keys(self.liqueurs),
            wine_beer: keys(self.wine_beer),
            mixers: keys(self.mixers),
            ..self
        }
    }

    /// Reject negative, non-finite, or out-of-range values
    pub fn validate(&self) -> Result<(), TablesError> {
        for (name, abv) in &self.alcohol_abv {
            if !abv.is_finite() || !(0.0..=100.0).contains(abv) {
                return Err(TablesError::Invalid(format!("ABV for '{}' is {}", name, abv)));
            }
        }

        let nutrition_tables = [("liqueur", &self.liqueurs), ("wine/beer", &self.wine_beer)];
        for (table, map) in nutrition_tables {
            for (name, n) in map {
                check_nutrition(table, name, n)?;
            }
        }
        for (name, m) in &self.mixers {
            check_nutrition("mixer", name, &m.resolve())?;
        }
        for (rim, n) in &self.rims {
            check_nutrition("rim", rim.as_str(), n)?;
        }

        let fractions = self
            .prep_dilution
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .chain(self.service_melt.iter().map(|(k, v)| (k.as_str(), *v)))
            .chain(self.time_multiplier.iter().map(|(k, v)| (k.as_str(), *v)));
        for (key, value) in fractions {
            if !value.is_finite() || value < 0.0 {
                return Err(TablesError::Invalid(format!("factor for '{}' is {}", key, value)));
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------------
    // Lookups. Names are normalized here; a miss is never an error.
    // ------------------------------------------------------------------------

    pub fn default_abv(&self, name: &str) -> Option<f64> {
        self.alcohol_abv.get(&normalize_name(name)).copied()
    }

    /// Non-ethanol nutrition per ounce for a liqueur, wine, or beer
    ///
    /// The liqueur table wins when a name appears in both.
    pub fn alcohol_nutrition(&self, name: &str) -> Option<Nutrition> {
        let key = normalize_name(name);
        self.liqueurs
            .get(&key)
            .or_else(|| self.wine_beer.get(&key))
            .copied()
    }

    pub fn mixer_nutrition(&self, name: &str) -> Option<MixerNutrition> {
        self.mixers.get(&normalize_name(name)).copied()
    }

    pub fn prep_fraction(&self, prep: PrepMethod) -> f64 {
        self.prep_dilution.get(&prep).copied().unwrap_or(0.0).max(0.0)
    }

    pub fn melt_fraction(&self, ice: IceType) -> f64 {
        self.service_melt.get(&ice).copied().unwrap_or(0.0).max(0.0)
    }

    pub fn time_factor(&self, time: ServingTime) -> f64 {
        self.time_multiplier.get(&time).copied().unwrap_or(0.0).max(0.0)
    }

    /// Typical ice pieces for a glass, using the rocks row for unmapped glasses
    pub fn ice_pieces(&self, glass: Glass, ice: IceType) -> Option<u32> {
        self.glass_ice_pieces
            .get(&glass)
            .or_else(|| self.glass_ice_pieces.get(&Glass::Rocks))
            .and_then(|row| row.get(&ice))
            .copied()
    }

    pub fn rim_additive(&self, rim: Rim) -> Nutrition {
        self.rims.get(&rim).copied().unwrap_or_default()
    }
}

fn check_nutrition(table: &str, name: &str, n: &Nutrition) -> Result<(), TablesError> {
    let values = [n.calories, n.sugar, n.carbs, n.fat, n.sodium];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(TablesError::Invalid(format!(
            "{} entry '{}' has a negative or non-finite value",
            table, name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        ReferenceTables::builtin().validate().unwrap();
    }

    #[test]
    fn test_default_abv_lookup_normalizes() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.default_abv("  Vodka"), Some(40.0));
        assert_eq!(tables.default_abv("TRIPLE  SEC"), Some(30.0));
        assert_eq!(tables.default_abv("unobtainium"), None);
    }

    #[test]
    fn test_tonic_matches_reference_values() {
        let tonic = ReferenceTables::builtin().mixer_nutrition("Tonic").unwrap().resolve();
        assert_eq!(tonic.calories, 10.0);
        assert_eq!(tonic.sugar, 2.5);
        assert_eq!(tonic.carbs, 3.0);
        assert_eq!(tonic.sodium, 5.0);
    }

    #[test]
    fn test_carbs_fall_back_to_sugar() {
        let cola = ReferenceTables::builtin().mixer_nutrition("cola").unwrap();
        assert_eq!(cola.carbs, None);
        let resolved = cola.resolve();
        assert_eq!(resolved.carbs, resolved.sugar);
        assert!(resolved.carbs > 0.0);
    }

    #[test]
    fn test_liqueur_wins_over_wine_beer() {
        let mut tables = ReferenceTables::builtin().clone();
        tables.wine_beer.insert("amaretto".to_string(), per_oz(1.0, 1.0, 1.0));
        let n = tables.alcohol_nutrition("amaretto").unwrap();
        assert_eq!(n.calories, 44.0);
    }

    #[test]
    fn test_spirits_have_no_extra_nutrition() {
        assert_eq!(ReferenceTables::builtin().alcohol_nutrition("vodka"), None);
    }

    #[test]
    fn test_unknown_enum_values_have_zero_factor() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.prep_fraction(PrepMethod::Unknown), 0.0);
        assert_eq!(tables.melt_fraction(IceType::Unknown), 0.0);
        assert_eq!(tables.time_factor(ServingTime::Unknown), 0.0);
        assert_eq!(tables.prep_fraction(PrepMethod::BuiltNeat), 0.0);
        assert_eq!(tables.melt_fraction(IceType::None), 0.0);
    }

    #[test]
    fn test_unmapped_glass_uses_rocks_row() {
        let tables = ReferenceTables::builtin();
        assert_eq!(
            tables.ice_pieces(Glass::Unknown, IceType::SmallCube),
            tables.ice_pieces(Glass::Rocks, IceType::SmallCube)
        );
        assert_eq!(tables.ice_pieces(Glass::Highball, IceType::SmallCube), Some(12));
    }

    #[test]
    fn test_overlay_replaces_only_given_tables() {
        let tables = ReferenceTables::from_json(
            r#"{"mixers": {"  House  Sour ": {"calories": 20, "sugar": 5}}}"#,
        )
        .unwrap();
        let sour = tables.mixer_nutrition("house sour").unwrap().resolve();
        assert_eq!(sour.carbs, 5.0);
        assert_eq!(tables.mixer_nutrition("tonic"), None);
        // Untouched tables keep built-in contents
        assert_eq!(tables.default_abv("gin"), Some(40.0));
        assert_eq!(tables.prep_fraction(PrepMethod::ShakenOverIce), 0.20);
    }

    #[test]
    fn test_overlay_rejects_negative_values() {
        let err = ReferenceTables::from_json(r#"{"service_melt": {"crushed": -0.5}}"#).unwrap_err();
        assert!(matches!(err, TablesError::Invalid(_)));

        let err = ReferenceTables::from_json(r#"{"alcohol_abv": {"moonshine": 150}}"#).unwrap_err();
        assert!(matches!(err, TablesError::Invalid(_)));
    }

    #[test]
    fn test_overlay_rejects_malformed_json() {
        let err = ReferenceTables::from_json("{not json").unwrap_err();
        assert!(matches!(err, TablesError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ReferenceTables::from_file("/nonexistent/drinkcalc/tables.json").unwrap_err();
        assert!(matches!(err, TablesError::Io(_, _)));
    }
}
