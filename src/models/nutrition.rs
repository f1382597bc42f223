//! Shared nutrition data structure
//!
//! Used for per-ounce table entries, aggregated drink totals, and rim additives.

use serde::{Deserialize, Serialize};

/// Nutritional information (excluding ethanol calories)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub sugar: f64,  // grams
    #[serde(default)]
    pub carbs: f64,  // grams
    #[serde(default)]
    pub fat: f64,    // grams
    #[serde(default)]
    pub sodium: f64, // milligrams
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            sugar: self.sugar * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
            sodium: self.sodium * multiplier,
        }
    }

    /// True when every value is a finite number
    pub fn is_finite(&self) -> bool {
        [self.calories, self.sugar, self.carbs, self.fat, self.sodium]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            calories: self.calories + other.calories,
            sugar: self.sugar + other.sugar,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            sodium: self.sodium + other.sodium,
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::AddAssign for Nutrition {
    fn add_assign(&mut self, other: Nutrition) {
        *self = Nutrition::add(self, &other);
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_sum() {
        let tonic = Nutrition { calories: 10.0, sugar: 2.5, carbs: 3.0, fat: 0.0, sodium: 5.0 };
        let total: Nutrition = vec![tonic * 1.5, Nutrition::zero()].into_iter().sum();
        assert!((total.calories - 15.0).abs() < 1e-9);
        assert!((total.sugar - 3.75).abs() < 1e-9);
        assert!((total.carbs - 4.5).abs() < 1e-9);
        assert!((total.sodium - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_add_assign() {
        let mut n = Nutrition::zero();
        n += Nutrition { calories: 4.0, sugar: 1.0, carbs: 1.0, fat: 0.0, sodium: 0.0 };
        n += Nutrition { calories: 0.0, sugar: 0.0, carbs: 0.0, fat: 0.5, sodium: 300.0 };
        assert_eq!(n, Nutrition { calories: 4.0, sugar: 1.0, carbs: 1.0, fat: 0.5, sodium: 300.0 });
    }
}
