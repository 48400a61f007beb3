use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::db::{MeasurementRepository, StationRepository};
use crate::services::{ClimateService, TemperatureService};

/// Running HTTP server
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Build repositories, services and the router, then spawn the server.
    pub async fn build(config: Config, pool: SqlitePool) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let measurement_repo = MeasurementRepository::new(pool.clone());
        let station_repo = StationRepository::new(pool);

        let temperature_service = TemperatureService::new(measurement_repo.clone());
        let climate_service =
            ClimateService::new(measurement_repo, station_repo, config.anchors.clone());

        info!(
            "Listing anchors: reference date {}, active station {}, derived from data: {}",
            config.anchors.reference_date,
            config.anchors.active_station,
            config.anchors.derive_from_data
        );

        let app_state = AppState {
            temperature_service,
            climate_service,
        };
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        // Bind before spawning so address errors surface from build()
        let addr = config.server_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Starting HTTP server on {}", addr);

        let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

        info!("Application initialized successfully");

        Ok(Self { server_handle })
    }

    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
