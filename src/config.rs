use chrono::NaiveDate;
use std::env;

use crate::services::ClimateAnchors;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("REFERENCE_DATE must be YYYY-MM-DD, got {value:?}")]
    InvalidReferenceDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    pub anchors: ClimateAnchors,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ClimateAnchors::default();

        let reference_date = match var("REFERENCE_DATE") {
            Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map_err(|source| ConfigError::InvalidReferenceDate { value, source })?,
            None => defaults.reference_date,
        };

        Ok(Config {
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://Resources/hawaii.sqlite".to_string()),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .unwrap_or(5),
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: var("SERVER_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            anchors: ClimateAnchors {
                reference_date,
                active_station: var("ACTIVE_STATION").unwrap_or(defaults.active_station),
                derive_from_data: var("DERIVE_ANCHORS")
                    .unwrap_or_else(|| "false".to_string())
                    .parse()
                    .unwrap_or(false),
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
