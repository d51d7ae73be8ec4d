//! Analytics record storage
//!
//! Append-only collection of business-metric snapshots. Records are immutable
//! once inserted and are never deleted in normal operation.

use crate::analytics::AnalyticsRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection};
use uuid::Uuid;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS analytics (
    id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    active_users INTEGER NOT NULL DEFAULT 0,
    new_signups INTEGER NOT NULL DEFAULT 0,
    sales INTEGER NOT NULL DEFAULT 0,
    revenue REAL NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_analytics_date ON analytics(date DESC);
";

/// Analytics snapshot storage with SQLite backend
pub struct AnalyticsStore {
    db_path: String,
}

impl AnalyticsStore {
    /// Create a new analytics store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };

        let conn = store.open()?;
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to create analytics table")?;

        Ok(store)
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open database at {}", self.db_path))
    }

    /// Insert a pre-built record (seeding and tests use explicit dates)
    pub fn insert_record(&self, record: &AnalyticsRecord) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO analytics (id, date, active_users, new_signups, sales, revenue)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id.to_string(),
                record.date.to_rfc3339(),
                record.active_users,
                record.new_signups,
                record.sales,
                record.revenue,
            ],
        )
        .context("Failed to insert analytics record")?;

        Ok(())
    }

    /// Append one snapshot with a server-assigned timestamp
    ///
    /// No range validation beyond what the schema enforces (none).
    pub fn record_sample(
        &self,
        active_users: i64,
        new_signups: i64,
        sales: i64,
        revenue: f64,
    ) -> Result<AnalyticsRecord> {
        let record = AnalyticsRecord {
            id: Uuid::new_v4(),
            date: Utc::now(),
            active_users,
            new_signups,
            sales,
            revenue,
        };

        self.insert_record(&record)?;

        Ok(record)
    }

    /// The `limit` most recent records, ordered by date descending
    pub fn recent(&self, limit: usize) -> Result<Vec<AnalyticsRecord>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(
            "SELECT id, date, active_users, new_signups, sales, revenue
             FROM analytics
             ORDER BY datetime(date) DESC
             LIMIT ?1",
        )?;

        let records = stmt
            .query_map(params![limit], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<AnalyticsRecord> {
        let id_str: String = row.get(0)?;
        let date_str: String = row.get(1)?;

        Ok(AnalyticsRecord {
            id: Uuid::parse_str(&id_str)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
            date: DateTime::parse_from_rfc3339(&date_str)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                })?,
            active_users: row.get(2)?,
            new_signups: row.get(3)?,
            sales: row.get(4)?,
            revenue: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (AnalyticsStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = AnalyticsStore::new(db_path).unwrap();
        (store, temp_file)
    }

    fn record_for_month(month: u32, sales: i64) -> AnalyticsRecord {
        AnalyticsRecord {
            id: Uuid::new_v4(),
            date: Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap(),
            active_users: 100,
            new_signups: 10,
            sales,
            revenue: sales as f64 * 10.0,
        }
    }

    #[test]
    fn test_record_sample_assigns_id_and_timestamp() {
        let (store, _temp) = create_test_store();

        let before = Utc::now();
        let record = store.record_sample(250, 40, 1200, 9800.5).unwrap();

        assert!(record.date >= before);
        assert_eq!(record.sales, 1200);

        let stored = store.recent(1).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, record.id);
        assert_eq!(stored[0].revenue, 9800.5);
    }

    #[test]
    fn test_recent_orders_by_date_descending() {
        let (store, _temp) = create_test_store();

        // Insert out of chronological order
        for month in [3, 1, 4, 2] {
            store.insert_record(&record_for_month(month, month as i64 * 100)).unwrap();
        }

        let recent = store.recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].date.format("%b").to_string(), "Apr");
        assert_eq!(recent[1].date.format("%b").to_string(), "Mar");
        assert_eq!(recent[2].date.format("%b").to_string(), "Feb");
    }

    #[test]
    fn test_recent_with_fewer_records_than_limit() {
        let (store, _temp) = create_test_store();

        store.insert_record(&record_for_month(1, 100)).unwrap();

        let recent = store.recent(30).unwrap();
        assert_eq!(recent.len(), 1);
    }
}
