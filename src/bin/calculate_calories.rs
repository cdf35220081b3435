//! Utility to calculate daily calorie needs and optionally save the result
//!
//! Usage: calculate_calories <sex> <age> <height_cm> <weight_kg> <activity_level> [user_id]
//!
//! When a user_id is given the calculation is saved to the database.

use std::path::PathBuf;
use std::process::exit;

use tracing_subscriber::EnvFilter;

use fittrack::energy::{calculate_calories, CalorieInput};
use fittrack::models::CalorieRecord;

fn get_database_path() -> PathBuf {
    std::env::var("FITTRACK_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("fittrack.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fittrack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    fittrack::build_info::print_startup_banner();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 5 {
        eprintln!(
            "Usage: calculate_calories <sex> <age> <height_cm> <weight_kg> <activity_level> [user_id]"
        );
        eprintln!("  sex: male | female");
        eprintln!("  activity_level: sedentary | light | moderate | active | very_active");
        exit(2);
    }

    let input = CalorieInput {
        sex: args[0].parse()?,
        age: args[1].parse()?,
        height_cm: args[2].parse()?,
        weight_kg: args[3].parse()?,
        activity_level: args[4].parse()?,
    };

    let result = calculate_calories(&input)?;
    println!("BMR:          {} kcal/day", result.bmr);
    println!("TDEE:         {} kcal/day", result.tdee);
    println!("Max calories: {} kcal/day", result.max_calories);

    if let Some(user_id) = args.get(5) {
        let db_path = get_database_path();
        println!("Database path: {}", db_path.display());

        let database = fittrack::db::Database::new(&db_path)?;
        database.with_conn(|conn| {
            fittrack::db::migrations::run_migrations(conn)?;
            let record = CalorieRecord::create(conn, user_id, &input, &result)?;
            println!("Saved calorie record #{} for {}", record.id, record.user_id);
            Ok(())
        })?;
    }

    Ok(())
}
