use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Database entity models, mirroring the `measurement` and `station` tables.
// Dates are kept as the ISO-8601 text the store holds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Min/avg/max of `tobs` over a date range.
///
/// All three fields are `None` when no measurement matched the range; this is
/// a valid result and serializes as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, FromRow, Serialize, ToSchema)]
pub struct TemperatureStats {
    pub min_temperature: Option<f64>,
    pub avg_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
}

impl TemperatureStats {
    pub fn is_empty(&self) -> bool {
        self.min_temperature.is_none()
            && self.avg_temperature.is_none()
            && self.max_temperature.is_none()
    }

    /// Pull the average back inside `[min, max]` when float summation in the
    /// store rounded it past either bound.
    pub fn with_avg_within_bounds(self) -> Self {
        match (self.min_temperature, self.avg_temperature, self.max_temperature) {
            (Some(min), Some(avg), Some(max)) if min <= max => Self {
                avg_temperature: Some(avg.clamp(min, max)),
                ..self
            },
            _ => self,
        }
    }
}
