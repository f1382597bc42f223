//! Data models
//!
//! Recipe inputs, calculated results, and the saved-drink database entity.

mod drink;
mod nutrition;
mod saved_drink;
mod serving;

pub use drink::{AlcoholItem, DrinkResult, MixerItem, RecipeConfig};
pub use nutrition::Nutrition;
pub use saved_drink::{SavedDrink, SavedDrinkCreate};
pub use serving::{Glass, IceType, PrepMethod, Rim, ServingTime};
