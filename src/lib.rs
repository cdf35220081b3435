//! fittrack library
//!
//! Core functionality for fitness tracking: calorie needs calculation,
//! weight logging, and meal analysis records.

pub mod build_info;
pub mod db;
pub mod energy;
pub mod meal;
pub mod models;
