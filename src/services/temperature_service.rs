use tracing::instrument;

use crate::db::{DbError, MeasurementRepository, TemperatureStats};

#[derive(Clone)]
pub struct TemperatureService {
    measurement_repo: MeasurementRepository,
}

impl TemperatureService {
    pub fn new(measurement_repo: MeasurementRepository) -> Self {
        Self { measurement_repo }
    }

    /// Minimum, average and maximum observed temperature for all measurements
    /// dated on or after `start_date` and, when given, on or before `end_date`.
    ///
    /// Dates are not validated. A range that matches nothing (including one
    /// where `end_date < start_date`) yields all-`None` stats, not an error.
    #[instrument(skip(self))]
    pub async fn compute_temperature_stats(
        &self,
        start_date: &str,
        end_date: Option<&str>,
    ) -> Result<TemperatureStats, DbError> {
        self.measurement_repo
            .temperature_stats(start_date, end_date)
            .await
    }
}
