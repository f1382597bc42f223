//! Recipe suggestion filter
//!
//! Runs the calculator over a set of named recipes, keeps the ones inside
//! every bound, and orders them by calories.

use serde::{Deserialize, Serialize};

use super::calculator::calculate;
use super::normalize::normalize_name;
use super::tables::ReferenceTables;
use crate::models::{DrinkResult, RecipeConfig};

/// Inclusive bounds; `None` leaves a dimension unconstrained
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeFilter {
    #[serde(default)]
    pub name_contains: Option<String>,
    /// Bounds on the as-served ABV
    #[serde(default)]
    pub min_abv: Option<f64>,
    #[serde(default)]
    pub max_abv: Option<f64>,
    #[serde(default)]
    pub min_kcal: Option<f64>,
    #[serde(default)]
    pub max_kcal: Option<f64>,
    #[serde(default)]
    pub max_sugar_g: Option<f64>,
}

impl RecipeFilter {
    pub fn matches(&self, name: &str, result: &DrinkResult) -> bool {
        if let Some(ref needle) = self.name_contains {
            let needle = normalize_name(needle);
            if !normalize_name(name).contains(&needle) {
                return false;
            }
        }

        within(result.start_abv, self.min_abv, self.max_abv)
            && within(result.total_kcal, self.min_kcal, self.max_kcal)
            && within(result.sugar_g, None, self.max_sugar_g)
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

/// A recipe that passed the filter, with its computed result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub result: DrinkResult,
}

/// Filter and sort recipes ascending by calories (then by name)
pub fn suggest<'a, I>(recipes: I, filter: &RecipeFilter, tables: &ReferenceTables) -> Vec<Suggestion>
where
    I: IntoIterator<Item = (&'a str, &'a RecipeConfig)>,
{
    let mut matches: Vec<Suggestion> = recipes
        .into_iter()
        .filter_map(|(name, recipe)| {
            let result = calculate(recipe, tables);
            filter.matches(name, &result).then(|| Suggestion {
                name: name.to_string(),
                result,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        a.result
            .total_kcal
            .total_cmp(&b.result.total_kcal)
            .then_with(|| a.name.cmp(&b.name))
    });
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlcoholItem, MixerItem};

    fn catalog() -> Vec<(String, RecipeConfig)> {
        vec![
            (
                "Rum & Coke".to_string(),
                RecipeConfig {
                    alcohols: vec![AlcoholItem::new("rum", 40.0, 2.0)],
                    mixers: vec![MixerItem::new("cola", 6.0)],
                    ..Default::default()
                },
            ),
            (
                "Vodka Soda".to_string(),
                RecipeConfig {
                    alcohols: vec![AlcoholItem::new("vodka", 40.0, 1.5)],
                    mixers: vec![MixerItem::new("soda water", 4.0)],
                    ..Default::default()
                },
            ),
            (
                "Straight Vodka".to_string(),
                RecipeConfig {
                    alcohols: vec![AlcoholItem::new("vodka", 40.0, 2.0)],
                    ..Default::default()
                },
            ),
        ]
    }

    fn run(filter: &RecipeFilter) -> Vec<String> {
        let recipes = catalog();
        suggest(
            recipes.iter().map(|(n, r)| (n.as_str(), r)),
            filter,
            ReferenceTables::builtin(),
        )
        .into_iter()
        .map(|s| s.name)
        .collect()
    }

    #[test]
    fn test_no_bounds_returns_everything_sorted_by_kcal() {
        assert_eq!(run(&RecipeFilter::default()), vec!["Vodka Soda", "Straight Vodka", "Rum & Coke"]);
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let filter = RecipeFilter { name_contains: Some("  VODKA".to_string()), ..Default::default() };
        assert_eq!(run(&filter), vec!["Vodka Soda", "Straight Vodka"]);
    }

    #[test]
    fn test_abv_bounds_are_inclusive() {
        let filter = RecipeFilter { min_abv: Some(40.0), max_abv: Some(40.0), ..Default::default() };
        assert_eq!(run(&filter), vec!["Straight Vodka"]);

        let filter = RecipeFilter { max_abv: Some(20.0), ..Default::default() };
        assert_eq!(run(&filter), vec!["Vodka Soda", "Rum & Coke"]);
    }

    #[test]
    fn test_sugar_and_kcal_bounds() {
        let filter = RecipeFilter { max_sugar_g: Some(0.0), ..Default::default() };
        assert_eq!(run(&filter), vec!["Vodka Soda", "Straight Vodka"]);

        let filter = RecipeFilter { min_kcal: Some(120.0), max_kcal: Some(140.0), ..Default::default() };
        assert_eq!(run(&filter), vec!["Straight Vodka"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let filter = RecipeFilter { min_kcal: Some(10_000.0), ..Default::default() };
        assert!(run(&filter).is_empty());
    }
}
