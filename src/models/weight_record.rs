//! Weight record model
//!
//! Body weight log entries, one per measurement.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// A body weight log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRecord {
    pub id: i64,
    pub user_id: String,
    pub weight_kg: f64,
    pub notes: Option<String>,
    pub recorded_at: String,
    pub created_at: String,
}

/// Data for creating a weight record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRecordCreate {
    pub weight_kg: f64,
    pub notes: Option<String>,
    /// Measurement time; defaults to now
    pub recorded_at: Option<String>,
}

impl WeightRecord {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            weight_kg: row.get("weight_kg")?,
            notes: row.get("notes")?,
            recorded_at: row.get("recorded_at")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Log a weight measurement for a user
    pub fn create(conn: &Connection, user_id: &str, data: &WeightRecordCreate) -> DbResult<Self> {
        if !data.weight_kg.is_finite() || data.weight_kg <= 0.0 {
            return Err(DbError::InvalidValue(
                "weight must be a positive number".to_string(),
            ));
        }

        let recorded_at = data.recorded_at.clone().unwrap_or_else(|| {
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
        });

        conn.execute(
            r#"
            INSERT INTO weight_records (user_id, weight_kg, notes, recorded_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![user_id, data.weight_kg, data.notes, recorded_at],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a weight record by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM weight_records WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's weight records, newest measurement first
    pub fn list_for_user(conn: &Connection, user_id: &str, limit: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM weight_records WHERE user_id = ?1
             ORDER BY recorded_at DESC, id DESC LIMIT ?2",
        )?;
        let records = stmt
            .query_map(params![user_id, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Delete a weight record
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM weight_records WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn entry(weight_kg: f64, recorded_at: &str) -> WeightRecordCreate {
        WeightRecordCreate {
            weight_kg,
            notes: None,
            recorded_at: Some(recorded_at.to_string()),
        }
    }

    #[test]
    fn test_create_and_get() {
        let conn = test_conn();
        let record = WeightRecord::create(
            &conn,
            "user-1",
            &WeightRecordCreate {
                weight_kg: 81.4,
                notes: Some("after workout".to_string()),
                recorded_at: None,
            },
        )
        .unwrap();

        assert_eq!(record.weight_kg, 81.4);
        assert_eq!(record.notes.as_deref(), Some("after workout"));
        assert!(!record.recorded_at.is_empty());

        let fetched = WeightRecord::get_by_id(&conn, record.id).unwrap().unwrap();
        assert_eq!(fetched.weight_kg, 81.4);
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let conn = test_conn();
        assert!(matches!(
            WeightRecord::create(&conn, "user-1", &entry(0.0, "2026-01-01T08:00:00Z")),
            Err(DbError::InvalidValue(_))
        ));
        assert!(matches!(
            WeightRecord::create(&conn, "user-1", &entry(-5.0, "2026-01-01T08:00:00Z")),
            Err(DbError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_list_newest_first_scoped_to_user() {
        let conn = test_conn();
        WeightRecord::create(&conn, "user-1", &entry(82.0, "2026-01-01T08:00:00Z")).unwrap();
        WeightRecord::create(&conn, "user-1", &entry(81.2, "2026-01-08T08:00:00Z")).unwrap();
        WeightRecord::create(&conn, "user-2", &entry(95.0, "2026-01-09T08:00:00Z")).unwrap();

        let records = WeightRecord::list_for_user(&conn, "user-1", 30).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].weight_kg, 81.2);
        assert_eq!(records[1].weight_kg, 82.0);
    }

    #[test]
    fn test_delete() {
        let conn = test_conn();
        let record =
            WeightRecord::create(&conn, "user-1", &entry(80.0, "2026-01-01T08:00:00Z")).unwrap();
        assert!(WeightRecord::delete(&conn, record.id).unwrap());
        assert!(!WeightRecord::delete(&conn, record.id).unwrap());
        assert!(WeightRecord::get_by_id(&conn, record.id).unwrap().is_none());
    }
}
