//! Drink calculation engine
//!
//! Pure functions over a [`RecipeConfig`](crate::models::RecipeConfig) and an
//! injected [`ReferenceTables`]: aggregation, two-stage dilution, ABV and
//! calories, plus ingredient lookup and recipe filtering.

pub mod aggregate;
pub mod calculator;
pub mod dilution;
pub mod filter;
pub mod lookup;
pub mod normalize;
pub mod tables;
pub mod units;

pub use aggregate::{aggregate, Aggregate};
pub use calculator::{abv_percent, calculate, ethanol_kcal};
pub use dilution::{dilution, Dilution};
pub use filter::{suggest, RecipeFilter, Suggestion};
pub use lookup::{known_names, lookup_ingredient, IngredientInfo, IngredientKind};
pub use normalize::normalize_name;
pub use tables::{MixerNutrition, ReferenceTables, TablesError};
pub use units::{to_fl_oz, ML_PER_FL_OZ};
