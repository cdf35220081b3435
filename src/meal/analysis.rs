//! Meal analysis reply parsing
//!
//! The image-analysis collaborator replies with a JSON document describing
//! the food items it recognized. Models tend to wrap the JSON in Markdown
//! code fences, omit confidence scores, or return out-of-range values, so
//! the reply is cleaned and normalized before it becomes a [`MealAnalysis`].

use serde::Deserialize;
use thiserror::Error;

use super::types::{FoodItem, MealAnalysis, MealType};

/// Errors from parsing an analysis reply
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid meal type: {0}")]
    InvalidMealType(String),

    #[error("analysis reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("analysis reply contains no food items")]
    NoFoodItems,

    #[error("analysis reply contains a food item without a name")]
    UnnamedFoodItem,
}

/// Reply payload as produced by the analysis service.
///
/// The service uses camelCase field names; aliases keep snake_case replies
/// working too. Calories arrive as floats and confidences may be missing.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(alias = "foodItems")]
    food_items: Vec<RawFoodItem>,
    #[serde(alias = "totalCalories")]
    total_calories: f64,
    #[serde(alias = "analysisConfidence")]
    analysis_confidence: f64,
}

#[derive(Debug, Deserialize)]
struct RawFoodItem {
    name: String,
    #[serde(alias = "estimatedCalories")]
    estimated_calories: f64,
    confidence: Option<f64>,
    quantity: Option<String>,
}

/// Strip Markdown code fences from a model reply
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim_start_matches(['\r', '\n'])
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Clamp a confidence score into [0, 1], warning when the value was out of range
fn clamp_confidence(value: f64, context: &str) -> f64 {
    if !(0.0..=1.0).contains(&value) {
        tracing::warn!("confidence {} for {} out of range, clamping", value, context);
    }
    value.clamp(0.0, 1.0)
}

/// Parse and normalize an analysis reply into a [`MealAnalysis`]
///
/// Calorie estimates are rounded to whole kcal. Missing per-item confidence
/// defaults to 0.5; all confidences are clamped into [0, 1].
pub fn parse_analysis_response(
    text: &str,
    meal_type: MealType,
) -> Result<MealAnalysis, AnalysisError> {
    let raw: RawAnalysis = serde_json::from_str(strip_code_fences(text))?;

    if raw.food_items.is_empty() {
        return Err(AnalysisError::NoFoodItems);
    }

    let mut food_items = Vec::with_capacity(raw.food_items.len());
    for item in raw.food_items {
        if item.name.trim().is_empty() {
            return Err(AnalysisError::UnnamedFoodItem);
        }
        let confidence = clamp_confidence(item.confidence.unwrap_or(0.5), &item.name);
        food_items.push(FoodItem {
            name: item.name,
            estimated_calories: item.estimated_calories.round() as i64,
            confidence,
            quantity: item.quantity,
        });
    }

    Ok(MealAnalysis {
        meal_type,
        food_items,
        total_calories: raw.total_calories.round() as i64,
        analysis_confidence: clamp_confidence(raw.analysis_confidence, "analysis"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"{
        "foodItems": [
            {"name": "scrambled eggs", "estimatedCalories": 182.4, "confidence": 0.9, "quantity": "2 eggs"},
            {"name": "toast", "estimatedCalories": 74.6}
        ],
        "totalCalories": 257.0,
        "analysisConfidence": 0.85
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let analysis = parse_analysis_response(REPLY, MealType::Breakfast).unwrap();
        assert_eq!(analysis.meal_type, MealType::Breakfast);
        assert_eq!(analysis.food_items.len(), 2);
        assert_eq!(analysis.food_items[0].estimated_calories, 182);
        assert_eq!(analysis.food_items[0].quantity.as_deref(), Some("2 eggs"));
        assert_eq!(analysis.total_calories, 257);
        assert!((analysis.analysis_confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_missing_confidence_defaults_to_half() {
        let analysis = parse_analysis_response(REPLY, MealType::Breakfast).unwrap();
        assert!((analysis.food_items[1].confidence - 0.5).abs() < 1e-9);
        assert_eq!(analysis.food_items[1].quantity, None);
    }

    #[test]
    fn test_parse_with_json_code_fence() {
        let fenced = format!("```json\n{}\n```", REPLY);
        let analysis = parse_analysis_response(&fenced, MealType::Lunch).unwrap();
        assert_eq!(analysis.food_items.len(), 2);
    }

    #[test]
    fn test_parse_with_bare_code_fence() {
        let fenced = format!("```\n{}\n```", REPLY);
        assert!(parse_analysis_response(&fenced, MealType::Lunch).is_ok());
    }

    #[test]
    fn test_out_of_range_confidence_clamped() {
        let reply = r#"{
            "foodItems": [{"name": "pizza", "estimatedCalories": 800, "confidence": 1.7}],
            "totalCalories": 800,
            "analysisConfidence": -0.2
        }"#;
        let analysis = parse_analysis_response(reply, MealType::Dinner).unwrap();
        assert!((analysis.food_items[0].confidence - 1.0).abs() < 1e-9);
        assert!((analysis.analysis_confidence - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_food_items_rejected() {
        let reply = r#"{"foodItems": [], "totalCalories": 0, "analysisConfidence": 0.5}"#;
        assert!(matches!(
            parse_analysis_response(reply, MealType::Dinner),
            Err(AnalysisError::NoFoodItems)
        ));
    }

    #[test]
    fn test_unnamed_food_item_rejected() {
        let reply = r#"{
            "foodItems": [{"name": "  ", "estimatedCalories": 100}],
            "totalCalories": 100,
            "analysisConfidence": 0.5
        }"#;
        assert!(matches!(
            parse_analysis_response(reply, MealType::Dinner),
            Err(AnalysisError::UnnamedFoodItem)
        ));
    }

    #[test]
    fn test_non_json_reply_rejected() {
        assert!(matches!(
            parse_analysis_response("I could not analyze this image.", MealType::Lunch),
            Err(AnalysisError::Json(_))
        ));
    }

    #[test]
    fn test_snake_case_reply_accepted() {
        let reply = r#"{
            "food_items": [{"name": "salad", "estimated_calories": 150, "confidence": 0.8}],
            "total_calories": 150,
            "analysis_confidence": 0.8
        }"#;
        let analysis = parse_analysis_response(reply, MealType::Lunch).unwrap();
        assert_eq!(analysis.total_calories, 150);
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!("dessert".parse::<MealType>().unwrap(), MealType::Dessert);
        assert_eq!("Breakfast".parse::<MealType>().unwrap(), MealType::Breakfast);
        assert!(matches!(
            "snack".parse::<MealType>(),
            Err(AnalysisError::InvalidMealType(_))
        ));
    }

    #[test]
    fn test_unavailable_fallback() {
        let fallback = MealAnalysis::unavailable(MealType::Dinner);
        assert_eq!(fallback.meal_type, MealType::Dinner);
        assert!(fallback.food_items.is_empty());
        assert_eq!(fallback.total_calories, 0);
        assert_eq!(fallback.analysis_confidence, 0.0);
    }
}
