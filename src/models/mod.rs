//! Data models
//!
//! Rust structs representing database entities.

mod calorie_record;
mod meal_record;
mod weight_record;

pub use calorie_record::CalorieRecord;
pub use meal_record::MealRecord;
pub use weight_record::{WeightRecord, WeightRecordCreate};
