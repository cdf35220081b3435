//! Meal domain types
//!
//! A meal is categorized by type and described by an analysis: the food
//! items identified in the photo with per-item calorie estimates and
//! confidence scores.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisError;

/// Meal type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Dessert => "dessert",
        }
    }
}

impl FromStr for MealType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "dessert" => Ok(MealType::Dessert),
            _ => Err(AnalysisError::InvalidMealType(s.to_string())),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single food item identified in a meal photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    /// Estimated calories for this item (kcal)
    pub estimated_calories: i64,
    /// Confidence score in [0, 1]
    pub confidence: f64,
    /// Estimated portion size, e.g. "1 cup" or "2 slices"
    pub quantity: Option<String>,
}

/// Complete analysis of a photographed meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAnalysis {
    pub meal_type: MealType,
    pub food_items: Vec<FoodItem>,
    /// Total estimated calories across all items (kcal)
    pub total_calories: i64,
    /// Overall confidence in the analysis, in [0, 1]
    pub analysis_confidence: f64,
}

impl MealAnalysis {
    /// Conservative placeholder used when the analysis reply is unusable.
    ///
    /// No items, zero calories, zero confidence. Callers that want to keep
    /// a record of the meal despite a failed analysis store this instead.
    pub fn unavailable(meal_type: MealType) -> Self {
        Self {
            meal_type,
            food_items: Vec::new(),
            total_calories: 0,
            analysis_confidence: 0.0,
        }
    }
}
