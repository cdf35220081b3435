//! Calorie needs engine
//!
//! BMR via the Mifflin-St Jeor equation, TDEE via a fixed activity
//! multiplier table. Pure and deterministic: validated input in, rounded
//! result out, no side effects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation error for calorie calculation inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("age, height, and weight must be positive")]
    NonPositive,

    #[error("age out of range (must be at most 120 years)")]
    AgeOutOfRange,

    #[error("height out of range (must be 100-250 cm)")]
    HeightOutOfRange,

    #[error("weight out of range (must be 20-300 kg)")]
    WeightOutOfRange,

    #[error("unknown sex: {0}")]
    UnknownSex(String),

    #[error("unknown activity level: {0}")]
    UnknownActivityLevel(String),
}

/// Biological sex, selects the BMR offset term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Mifflin-St Jeor sex offset in kcal/day
    fn bmr_offset(&self) -> f64 {
        match self {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        }
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(ValidationError::UnknownSex(s.to_string())),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level, selects a fixed TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn all() -> &'static [ActivityLevel] {
        &[
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ]
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(ValidationError::UnknownActivityLevel(s.to_string())),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for a calorie needs calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieInput {
    pub sex: Sex,
    /// Age in years
    pub age: u32,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
}

impl CalorieInput {
    /// Check all inputs against their documented domains
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.age == 0 || self.height_cm <= 0.0 || self.weight_kg <= 0.0 {
            return Err(ValidationError::NonPositive);
        }
        if self.age > 120 {
            return Err(ValidationError::AgeOutOfRange);
        }
        if !(100.0..=250.0).contains(&self.height_cm) {
            return Err(ValidationError::HeightOutOfRange);
        }
        if !(20.0..=300.0).contains(&self.weight_kg) {
            return Err(ValidationError::WeightOutOfRange);
        }
        Ok(())
    }
}

/// Result of a calorie needs calculation, all values in kcal/day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieResult {
    /// Basal metabolic rate
    pub bmr: i64,
    /// Total daily energy expenditure
    pub tdee: i64,
    /// Daily calorie budget, equal to TDEE
    pub max_calories: i64,
}

/// Calculate BMR and TDEE from validated physical and activity inputs
///
/// BMR uses the Mifflin-St Jeor equation:
/// `10 * weight_kg + 6.25 * height_cm - 5 * age`, plus +5 for males
/// or -161 for females. TDEE multiplies the unrounded BMR by the
/// activity multiplier; both values are rounded half-away-from-zero
/// only at the end.
pub fn calculate_calories(input: &CalorieInput) -> Result<CalorieResult, ValidationError> {
    input.validate()?;

    let base = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * f64::from(input.age);
    let bmr_raw = base + input.sex.bmr_offset();

    // Multiply before rounding; rounding BMR first shifts results by
    // up to 1 kcal at the extremes.
    let tdee_raw = bmr_raw * input.activity_level.multiplier();

    let tdee = tdee_raw.round() as i64;
    Ok(CalorieResult {
        bmr: bmr_raw.round() as i64,
        tdee,
        max_calories: tdee,
    })
}
