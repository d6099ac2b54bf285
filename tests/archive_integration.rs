//! End-to-end tests over a real on-disk SQLite archive

use sensorscope::backend::{aggregate, DateRange, RowSource, SqliteRowSource};
use sensorscope::{Channel, SensorScopeError};

/// Create an archive file with one partition table per entry
fn write_archive(path: &std::path::Path, partitions: &[(&str, &[[f64; 8]])]) {
    let conn = rusqlite::Connection::open(path).unwrap();
    for (date, rows) in partitions {
        conn.execute_batch(&format!(
            "CREATE TABLE data{date} (
                 ch11 REAL, ch12 REAL, ch21 REAL, ch22 REAL,
                 ch31 REAL, ch32 REAL, ch41 REAL, ch42 REAL,
                 sensingdate TEXT
             );"
        ))
        .unwrap();
        for (i, readings) in rows.iter().enumerate() {
            conn.execute(
                &format!("INSERT INTO data{date} VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)"),
                rusqlite::params![
                    readings[0],
                    readings[1],
                    readings[2],
                    readings[3],
                    readings[4],
                    readings[5],
                    readings[6],
                    readings[7],
                    format!("2024-12-15T00:00:{:02}", i),
                ],
            )
            .unwrap();
        }
    }
}

#[test]
fn test_single_day_single_row_query() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.db");
    write_archive(
        &path,
        &[("20241215", &[[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]])],
    );

    let mut source = SqliteRowSource::open(&path).unwrap();
    let range = DateRange::parse("20241215", "20241215").unwrap();
    let channels = aggregate(range, &mut source, &mut |_p: u8| {}).unwrap();

    let ch1 = &channels[&Channel::Ch1];
    assert_eq!(ch1.raw(), &[1.0]);
    assert_eq!(ch1.compensation(), &[2.0]);
    assert_eq!(ch1.timestamp_at(0), Some("2024-12-15T00:00:00"));
    assert_eq!(Channel::Ch1.key(), "plot1");
}

#[test]
fn test_range_spanning_a_missing_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.db");
    write_archive(
        &path,
        &[
            (
                "20241215",
                &[
                    [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                    [2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ],
            ),
            // 20241216 has no table.
            ("20241217", &[[3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]]),
        ],
    );

    let mut source = SqliteRowSource::open(&path).unwrap();
    let range = DateRange::parse("20241215", "20241217").unwrap();
    let channels = aggregate(range, &mut source, &mut |_p: u8| {}).unwrap();

    assert_eq!(channels[&Channel::Ch1].raw(), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_missing_partition_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.db");
    let empty: &[[f64; 8]] = &[];
    write_archive(&path, &[("20241215", empty)]);

    let mut source = SqliteRowSource::open(&path).unwrap();
    let missing = sensorscope::backend::parse_day("20240101").unwrap();

    assert!(source.row_count(missing).unwrap_err().is_not_found());
}

#[test]
fn test_opening_a_missing_archive_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = SqliteRowSource::open(dir.path().join("nope.db")).unwrap_err();
    assert!(matches!(err, SensorScopeError::Sqlite(_)));
}
