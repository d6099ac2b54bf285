//! SQLite archive access
//!
//! The archive is a single SQLite file holding one table per calendar day,
//! named `data{YYYYMMDD}`, with eight numeric reading columns and a
//! timestamp column:
//!
//! ```sql
//! CREATE TABLE data20241215 (
//!     ch11 REAL, ch12 REAL, ch21 REAL, ch22 REAL,
//!     ch31 REAL, ch32 REAL, ch41 REAL, ch42 REAL,
//!     sensingdate TEXT
//! );
//! ```
//!
//! A query against a day with no table maps to
//! [`SensorScopeError::NotFound`], which the aggregator skips. The viewer
//! never writes, so the file is opened read-only.

use crate::backend::aggregator::DATE_FORMAT;
use crate::backend::source::{RowSource, SensorRow};
use crate::error::{Result, SensorScopeError};
use crate::types::READINGS_PER_ROW;
use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Default prefix of the per-day partition tables
pub const DEFAULT_TABLE_PREFIX: &str = "data";

/// Row source over a daily-partitioned SQLite archive file
#[derive(Debug)]
pub struct SqliteRowSource {
    conn: Connection,
    table_prefix: String,
}

impl SqliteRowSource {
    /// Open an existing archive file read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_prefix(path, DEFAULT_TABLE_PREFIX)
    }

    /// Open an existing archive file read-only with a custom table prefix
    pub fn open_with_prefix(path: impl AsRef<Path>, table_prefix: impl Into<String>) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self {
            conn,
            table_prefix: table_prefix.into(),
        })
    }

    /// Wrap an already open connection (used by tests)
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
        }
    }

    fn table_name(&self, date: NaiveDate) -> String {
        format!("{}{}", self.table_prefix, date.format(DATE_FORMAT))
    }

    /// Translate a missing-table failure into the non-fatal `NotFound`
    fn partition_error(date: NaiveDate, err: rusqlite::Error) -> SensorScopeError {
        match &err {
            rusqlite::Error::SqliteFailure(_, Some(message))
                if message.contains("no such table") =>
            {
                SensorScopeError::NotFound {
                    date: date.format(DATE_FORMAT).to_string(),
                }
            }
            _ => SensorScopeError::Sqlite(err),
        }
    }
}

impl RowSource for SqliteRowSource {
    fn row_count(&mut self, date: NaiveDate) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", self.table_name(date));
        self.conn
            .query_row(&sql, [], |row| row.get::<_, i64>(0))
            .map(|count| count as u64)
            .map_err(|e| Self::partition_error(date, e))
    }

    fn fetch_rows(&mut self, date: NaiveDate) -> Result<Vec<SensorRow>> {
        let sql = format!(
            "SELECT ch11, ch12, ch21, ch22, ch31, ch32, ch41, ch42, sensingdate FROM \"{}\"",
            self.table_name(date)
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| Self::partition_error(date, e))?;

        let rows = stmt
            .query_map([], |row| {
                let mut readings = [0.0; READINGS_PER_ROW];
                for (i, slot) in readings.iter_mut().enumerate() {
                    *slot = row.get::<_, f64>(i)?;
                }
                Ok(SensorRow {
                    readings,
                    sensing_time: row.get::<_, String>(READINGS_PER_ROW)?,
                })
            })
            .map_err(|e| Self::partition_error(date, e))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::aggregator::parse_day;

    fn archive_with_one_day() -> SqliteRowSource {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE data20241215 (
                 ch11 REAL, ch12 REAL, ch21 REAL, ch22 REAL,
                 ch31 REAL, ch32 REAL, ch41 REAL, ch42 REAL,
                 sensingdate TEXT
             );
             INSERT INTO data20241215 VALUES
                 (1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, '2024-12-15T00:00:00'),
                 (1.5, 2.5, 3.5, 4.5, 5.5, 6.5, 7.5, 8.5, '2024-12-15T00:00:01');",
        )
        .unwrap();
        SqliteRowSource::from_connection(conn)
    }

    #[test]
    fn test_row_count_of_existing_partition() {
        let mut source = archive_with_one_day();
        let count = source.row_count(parse_day("20241215").unwrap()).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_fetch_rows_preserves_order_and_columns() {
        let mut source = archive_with_one_day();
        let rows = source.fetch_rows(parse_day("20241215").unwrap()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].readings, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(rows[0].sensing_time, "2024-12-15T00:00:00");
        assert_eq!(rows[1].readings[0], 1.5);
    }

    #[test]
    fn test_missing_partition_maps_to_not_found() {
        let mut source = archive_with_one_day();
        let missing = parse_day("20241216").unwrap();

        let err = source.row_count(missing).unwrap_err();
        assert!(err.is_not_found());

        let err = source.fetch_rows(missing).unwrap_err();
        assert!(err.is_not_found());
    }
}
