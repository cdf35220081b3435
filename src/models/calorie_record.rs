//! Calorie record model
//!
//! Stores a calorie calculation verbatim: the input parameters the user
//! supplied and the result computed for them.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::energy::{CalorieInput, CalorieResult};

/// A saved calorie calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieRecord {
    pub id: i64,
    pub user_id: String,
    pub input: CalorieInput,
    pub result: CalorieResult,
    pub created_at: String,
    pub updated_at: String,
}

impl CalorieRecord {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let input_json: String = row.get("input_json")?;
        let input: CalorieInput = serde_json::from_str(&input_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            input,
            result: CalorieResult {
                bmr: row.get("bmr")?,
                tdee: row.get("tdee")?,
                max_calories: row.get("max_calories")?,
            },
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Save a calculation for a user
    pub fn create(
        conn: &Connection,
        user_id: &str,
        input: &CalorieInput,
        result: &CalorieResult,
    ) -> DbResult<Self> {
        let input_json = serde_json::to_string(input)?;

        conn.execute(
            r#"
            INSERT INTO calorie_records (user_id, input_json, bmr, tdee, max_calories)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                user_id,
                input_json,
                result.bmr,
                result.tdee,
                result.max_calories,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a calorie record by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM calorie_records WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's calorie records, newest first
    pub fn list_for_user(
        conn: &Connection,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM calorie_records WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3",
        )?;
        let records = stmt
            .query_map(params![user_id, limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
