//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- CALORIE RECORDS
        -- Saved calorie calculations: input parameters
        -- plus the computed BMR/TDEE result
        -- ============================================
        CREATE TABLE calorie_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            input_json TEXT NOT NULL,            -- serialized CalorieInput
            bmr INTEGER NOT NULL,                -- kcal/day
            tdee INTEGER NOT NULL,               -- kcal/day
            max_calories INTEGER NOT NULL,       -- kcal/day, equals tdee
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_calorie_records_user ON calorie_records(user_id, created_at);

        -- ============================================
        -- WEIGHT RECORDS
        -- Body weight log entries
        -- ============================================
        CREATE TABLE weight_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            weight_kg REAL NOT NULL,
            notes TEXT,
            recorded_at TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_weight_records_user ON weight_records(user_id, recorded_at);

        -- ============================================
        -- MEAL RECORDS
        -- Analyzed meals with their full analysis payload
        -- ============================================
        CREATE TABLE meal_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            meal_type TEXT NOT NULL CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'dessert')),
            analysis_json TEXT NOT NULL,         -- serialized MealAnalysis
            total_calories INTEGER NOT NULL,     -- denormalized for listings
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meal_records_user ON meal_records(user_id, created_at);
        "#,
    )?;

    Ok(())
}
