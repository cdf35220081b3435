//! Utility to log a body weight measurement and show recent history
//!
//! Usage: log_weight <user_id> <weight_kg> [notes]

use std::path::PathBuf;
use std::process::exit;

use tracing_subscriber::EnvFilter;

use fittrack::models::{WeightRecord, WeightRecordCreate};

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
    if args.len() < 2 {
        eprintln!("Usage: log_weight <user_id> <weight_kg> [notes]");
        exit(2);
    }

    let user_id = &args[0];
    let weight_kg: f64 = args[1].parse()?;
    let notes = args.get(2).cloned();

    let db_path = get_database_path();
    println!("Database path: {}", db_path.display());

    let database = fittrack::db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        fittrack::db::migrations::run_migrations(conn)?;

        let record = WeightRecord::create(
            conn,
            user_id,
            &WeightRecordCreate {
                weight_kg,
                notes: notes.clone(),
                recorded_at: None,
            },
        )?;
        println!(
            "Logged {:.1} kg for {} at {}",
            record.weight_kg, record.user_id, record.recorded_at
        );

        let history = WeightRecord::list_for_user(conn, user_id, 30)?;
        println!("Recent entries:");
        for entry in history {
            match entry.notes {
                Some(ref n) => println!("  {}  {:.1} kg  ({})", entry.recorded_at, entry.weight_kg, n),
                None => println!("  {}  {:.1} kg", entry.recorded_at, entry.weight_kg),
            }
        }
        Ok(())
    })?;

    Ok(())
}
