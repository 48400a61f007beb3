pub mod climate_service;
pub mod temperature_service;

pub use climate_service::{ClimateAnchors, ClimateService, TrailingWindow};
pub use temperature_service::TemperatureService;
