//! Energy calculation module
//!
//! Computes daily calorie needs (BMR and TDEE) from physical characteristics
//! and activity level.

pub mod engine;

pub use engine::{
    calculate_calories, ActivityLevel, CalorieInput, CalorieResult, Sex, ValidationError,
};
