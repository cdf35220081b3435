//! Meal analysis module
//!
//! Domain types for photographed meals and parsing of analysis replies
//! produced by the external image-analysis collaborator.

pub mod analysis;
pub mod types;

pub use analysis::{parse_analysis_response, AnalysisError};
pub use types::{FoodItem, MealAnalysis, MealType};
