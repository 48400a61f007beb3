use chrono::{Months, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, MeasurementRepository, StationRepository};

/// Most recent date in the hawaii dataset
pub const DEFAULT_REFERENCE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2017, 8, 23) {
    Some(date) => date,
    None => panic!("invalid default reference date"),
};
/// Station with the most observations in the hawaii dataset
pub const DEFAULT_ACTIVE_STATION: &str = "USC00519281";

/// Inclusive twelve month range ending at a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TrailingWindow {
    /// Month arithmetic clamps to the end of the month, so a window ending
    /// 2016-02-29 starts 2015-02-28.
    pub fn ending_at(reference: NaiveDate) -> Self {
        let start = reference
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start,
            end: reference,
        }
    }
}

/// Where the listing endpoints anchor their window and station filter.
#[derive(Debug, Clone)]
pub struct ClimateAnchors {
    pub reference_date: NaiveDate,
    pub active_station: String,
    /// Look up `MAX(date)` and the busiest station on each request instead of
    /// using the configured values.
    pub derive_from_data: bool,
}

impl Default for ClimateAnchors {
    fn default() -> Self {
        Self {
            reference_date: DEFAULT_REFERENCE_DATE,
            active_station: DEFAULT_ACTIVE_STATION.to_string(),
            derive_from_data: false,
        }
    }
}

#[derive(Clone)]
pub struct ClimateService {
    measurement_repo: MeasurementRepository,
    station_repo: StationRepository,
    anchors: ClimateAnchors,
}

impl ClimateService {
    pub fn new(
        measurement_repo: MeasurementRepository,
        station_repo: StationRepository,
        anchors: ClimateAnchors,
    ) -> Self {
        Self {
            measurement_repo,
            station_repo,
            anchors,
        }
    }

    /// Date -> precipitation for every measurement in the trailing window.
    ///
    /// Several stations report on the same day; the row stored last wins.
    #[instrument(skip(self))]
    pub async fn precipitation(&self) -> Result<BTreeMap<String, Option<f64>>, DbError> {
        let window = self.trailing_window().await?;
        let measurements = self
            .measurement_repo
            .find_in_window(window.start, window.end, None)
            .await?;

        let rows = measurements.len();
        let precipitation: BTreeMap<String, Option<f64>> = measurements
            .into_iter()
            .map(|m| (m.date, m.prcp))
            .collect();

        debug!("Collapsed {} rows into {} dates", rows, precipitation.len());
        Ok(precipitation)
    }

    /// Every station name in store order, duplicates included
    #[instrument(skip(self))]
    pub async fn station_names(&self) -> Result<Vec<String>, DbError> {
        let stations = self.station_repo.find_all().await?;
        Ok(stations.into_iter().map(|s| s.name).collect())
    }

    /// Temperatures observed by the active station during the trailing window
    #[instrument(skip(self))]
    pub async fn active_station_temperatures(&self) -> Result<Vec<f64>, DbError> {
        let window = self.trailing_window().await?;
        let station = self.active_station().await?;

        let measurements = self
            .measurement_repo
            .find_in_window(window.start, window.end, Some(&station))
            .await?;

        info!(
            "Station {} reported {} temperatures between {} and {}",
            station,
            measurements.len(),
            window.start,
            window.end
        );

        Ok(measurements.into_iter().map(|m| m.tobs).collect())
    }

    pub async fn trailing_window(&self) -> Result<TrailingWindow, DbError> {
        Ok(TrailingWindow::ending_at(self.reference_date().await?))
    }

    async fn reference_date(&self) -> Result<NaiveDate, DbError> {
        if !self.anchors.derive_from_data {
            return Ok(self.anchors.reference_date);
        }

        let latest = self.measurement_repo.find_latest_date().await?;
        match latest
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        {
            Some(date) => Ok(date),
            None => {
                warn!(
                    "Could not derive latest date from {:?}, using {}",
                    latest, self.anchors.reference_date
                );
                Ok(self.anchors.reference_date)
            }
        }
    }

    async fn active_station(&self) -> Result<String, DbError> {
        if !self.anchors.derive_from_data {
            return Ok(self.anchors.active_station.clone());
        }

        match self.measurement_repo.find_most_active_station().await? {
            Some(station) => Ok(station),
            None => {
                warn!(
                    "No measurements to rank stations, using {}",
                    self.anchors.active_station
                );
                Ok(self.anchors.active_station.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window_default_reference() {
        let window = TrailingWindow::ending_at(date(2017, 8, 23));
        assert_eq!(window.start, date(2016, 8, 23));
        assert_eq!(window.end, date(2017, 8, 23));
    }

    #[test]
    fn test_trailing_window_leap_day_clamps() {
        let window = TrailingWindow::ending_at(date(2016, 2, 29));
        assert_eq!(window.start, date(2015, 2, 28));
    }

    #[test]
    fn test_default_anchors() {
        let anchors = ClimateAnchors::default();
        assert_eq!(anchors.reference_date, date(2017, 8, 23));
        assert_eq!(anchors.active_station, "USC00519281");
        assert!(!anchors.derive_from_data);
    }

    #[test]
    fn test_default_reference_date_constant() {
        assert_eq!(DEFAULT_REFERENCE_DATE, date(2017, 8, 23));
    }
}
