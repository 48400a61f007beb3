#![allow(dead_code)]

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use surfs_up_api::db;
use tempfile::TempDir;

/// A seeded SQLite file opened through the production read-only pool.
/// Keep the struct alive for as long as the pool is used.
pub struct TestDb {
    pub pool: SqlitePool,
    pub url: String,
    _dir: TempDir,
}

pub type MeasurementRow<'a> = (&'a str, &'a str, Option<f64>, f64);

const SCHEMA: &str = r#"
CREATE TABLE measurement (
    id INTEGER NOT NULL PRIMARY KEY,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT
);
CREATE TABLE station (
    id INTEGER NOT NULL PRIMARY KEY,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT
);
"#;

/// Build a database with the given `(station, date, prcp, tobs)` measurements
/// and station names, both inserted in the order given.
pub async fn seeded_db(measurements: &[MeasurementRow<'_>], station_names: &[&str]) -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("hawaii.sqlite");

    let writer = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true),
    )
    .await
    .expect("Failed to create fixture database");

    sqlx::raw_sql(SCHEMA)
        .execute(&writer)
        .await
        .expect("Failed to create schema");

    for (station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&writer)
            .await
            .expect("Failed to insert measurement");
    }

    for (i, name) in station_names.iter().enumerate() {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, 21.3, -157.8, 3.0)",
        )
        .bind(format!("USC0000{}", i))
        .bind(*name)
        .execute(&writer)
        .await
        .expect("Failed to insert station");
    }

    writer.close().await;

    let url = format!("sqlite://{}", path.display());
    let pool = db::connect(&url, 2)
        .await
        .expect("Failed to open fixture database read-only");

    TestDb {
        pool,
        url,
        _dir: dir,
    }
}

/// A small slice of the hawaii dataset around the default reference date.
pub fn hawaii_sample() -> Vec<MeasurementRow<'static>> {
    vec![
        ("USC00519397", "2016-08-22", Some(0.4), 78.0),
        ("USC00519397", "2016-08-23", Some(0.0), 81.0),
        ("USC00519281", "2016-08-23", Some(1.79), 77.0),
        ("USC00519281", "2017-01-10", None, 62.0),
        ("USC00513117", "2017-08-23", Some(0.08), 82.0),
        ("USC00519281", "2017-08-18", Some(0.06), 79.0),
        ("USC00519281", "2017-08-24", Some(0.1), 85.0),
    ]
}
