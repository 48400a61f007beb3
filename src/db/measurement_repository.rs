use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use crate::db::{DbError, Measurement, TemperatureStats};

#[derive(Clone)]
pub struct MeasurementRepository {
    pool: SqlitePool,
}

impl MeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Min/avg/max of `tobs` for `date >= start` and, if given, `date <= end`.
    ///
    /// Dates are compared as text, so malformed input just matches nothing
    /// (or an odd subset) rather than failing.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, DbError> {
        debug!("Aggregating temperatures from {} to {:?}", start, end);

        let stats = sqlx::query_as::<_, TemperatureStats>(
            r#"
            SELECT CAST(MIN(tobs) AS REAL) AS min_temperature,
                   CAST(AVG(tobs) AS REAL) AS avg_temperature,
                   CAST(MAX(tobs) AS REAL) AS max_temperature
            FROM measurement
            WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        if stats.is_empty() {
            debug!("No measurements in range");
        }

        Ok(stats.with_avg_within_bounds())
    }

    /// Measurements with `start <= date <= end`, optionally for one station,
    /// in store order.
    #[instrument(skip(self))]
    pub async fn find_in_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        station: Option<&str>,
    ) -> Result<Vec<Measurement>, DbError> {
        debug!("Querying measurements from {} to {}", start, end);

        let measurements = sqlx::query_as::<_, Measurement>(
            r#"
            SELECT id, station, date, prcp, tobs
            FROM measurement
            WHERE date >= ?1 AND date <= ?2
              AND (?3 IS NULL OR station = ?3)
            ORDER BY id
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(station)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} measurements", measurements.len());
        Ok(measurements)
    }

    #[instrument(skip(self))]
    pub async fn find_latest_date(&self) -> Result<Option<String>, DbError> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        debug!("Latest measurement date: {:?}", latest);
        Ok(latest)
    }

    /// Station with the most measurement rows; ties go to the lower station id.
    #[instrument(skip(self))]
    pub async fn find_most_active_station(&self) -> Result<Option<String>, DbError> {
        let station: Option<(String, i64)> = sqlx::query_as(
            r#"
            SELECT station, COUNT(*) AS observations
            FROM measurement
            GROUP BY station
            ORDER BY observations DESC, station ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        match station {
            Some((station, observations)) => {
                info!("Most active station {} with {} observations", station, observations);
                Ok(Some(station))
            }
            None => {
                debug!("No measurements found in database");
                Ok(None)
            }
        }
    }
}
