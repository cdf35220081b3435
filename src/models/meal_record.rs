//! Meal record model
//!
//! Stores an analyzed meal: the meal type and the full analysis payload,
//! with total calories denormalized for listings.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::meal::MealAnalysis;

/// A saved meal analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: i64,
    pub user_id: String,
    pub analysis: MealAnalysis,
    pub total_calories: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl MealRecord {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let analysis_json: String = row.get("analysis_json")?;
        let analysis: MealAnalysis = serde_json::from_str(&analysis_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            analysis,
            total_calories: row.get("total_calories")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Save an analyzed meal for a user
    pub fn create(conn: &Connection, user_id: &str, analysis: &MealAnalysis) -> DbResult<Self> {
        let analysis_json = serde_json::to_string(analysis)?;

        conn.execute(
            r#"
            INSERT INTO meal_records (user_id, meal_type, analysis_json, total_calories)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                user_id,
                analysis.meal_type.as_str(),
                analysis_json,
                analysis.total_calories,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a meal record by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meal_records WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's meal records, newest first
    pub fn list_for_user(conn: &Connection, user_id: &str, limit: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM meal_records WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT ?2",
        )?;
        let records = stmt
            .query_map(params![user_id, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Delete a meal record
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meal_records WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::meal::{FoodItem, MealType};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_analysis(meal_type: MealType, total_calories: i64) -> MealAnalysis {
        MealAnalysis {
            meal_type,
            food_items: vec![FoodItem {
                name: "oatmeal".to_string(),
                estimated_calories: total_calories,
                confidence: 0.8,
                quantity: Some("1 cup".to_string()),
            }],
            total_calories,
            analysis_confidence: 0.8,
        }
    }

    #[test]
    fn test_create_and_get_round_trips_analysis() {
        let conn = test_conn();
        let analysis = sample_analysis(MealType::Breakfast, 310);

        let record = MealRecord::create(&conn, "user-1", &analysis).unwrap();
        assert_eq!(record.total_calories, 310);

        let fetched = MealRecord::get_by_id(&conn, record.id).unwrap().unwrap();
        assert_eq!(fetched.analysis, analysis);
        assert_eq!(fetched.analysis.meal_type, MealType::Breakfast);
    }

    #[test]
    fn test_fallback_analysis_can_be_stored() {
        let conn = test_conn();
        let record =
            MealRecord::create(&conn, "user-1", &MealAnalysis::unavailable(MealType::Dinner))
                .unwrap();
        assert_eq!(record.total_calories, 0);
        assert!(record.analysis.food_items.is_empty());
    }

    #[test]
    fn test_list_scoped_to_user() {
        let conn = test_conn();
        MealRecord::create(&conn, "user-1", &sample_analysis(MealType::Breakfast, 300)).unwrap();
        MealRecord::create(&conn, "user-1", &sample_analysis(MealType::Lunch, 650)).unwrap();
        MealRecord::create(&conn, "user-2", &sample_analysis(MealType::Dinner, 800)).unwrap();

        let records = MealRecord::list_for_user(&conn, "user-1", 10).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].analysis.meal_type, MealType::Lunch);
    }

    #[test]
    fn test_delete() {
        let conn = test_conn();
        let record =
            MealRecord::create(&conn, "user-1", &sample_analysis(MealType::Dessert, 420)).unwrap();
        assert!(MealRecord::delete(&conn, record.id).unwrap());
        assert!(MealRecord::get_by_id(&conn, record.id).unwrap().is_none());
    }
}
