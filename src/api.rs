use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument};
use utoipa::OpenApi;

use crate::db::TemperatureStats;
use crate::services::{ClimateService, TemperatureService};

pub const ROUTE_LISTING: &str = "Available Routes:\n\
/api/v1.0/precipitation\n\
/api/v1.0/stations\n\
/api/v1.0/tobs\n\
/api/v1.0/<start>\n\
/api/v1.0/<start>/<end>\n";

#[derive(Clone)]
pub struct AppState {
    pub temperature_service: TemperatureService,
    pub climate_service: ClimateService,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(welcome, precipitation, stations, tobs, temperature_from, temperature_range),
    components(schemas(TemperatureStats)),
    tags((name = "climate", description = "Hawaii climate observations"))
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/precipitation", get(precipitation))
        .route("/stations", get(stations))
        .route("/tobs", get(tobs))
        .route("/{start}", get(temperature_from))
        .route("/{start}/{end}", get(temperature_range))
        .with_state(state);

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .nest("/api/v1.0", api_routes)
}

/// List all available API routes
#[utoipa::path(
    get,
    path = "/",
    tag = "climate",
    responses((status = 200, description = "Route listing", body = String, content_type = "text/plain"))
)]
async fn welcome() -> &'static str {
    ROUTE_LISTING
}

async fn health() -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

/// Precipitation by date over the trailing twelve months
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "climate",
    responses(
        (status = 200, description = "Date to precipitation amount (null when unreported)", body = BTreeMap<String, f64>),
        (status = 500, description = "Data store failure")
    )
)]
#[instrument(skip(state))]
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, StatusCode> {
    debug!("Fetching precipitation for trailing window");
    let precipitation = state.climate_service.precipitation().await.map_err(|e| {
        error!("Failed to fetch precipitation: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Retrieved precipitation for {} dates", precipitation.len());
    Ok(Json(precipitation))
}

/// Names of all stations
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "climate",
    responses(
        (status = 200, description = "Station names in store order", body = [String]),
        (status = 500, description = "Data store failure")
    )
)]
#[instrument(skip(state))]
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, StatusCode> {
    let names = state.climate_service.station_names().await.map_err(|e| {
        error!("Failed to fetch stations: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Retrieved {} station names", names.len());
    Ok(Json(names))
}

/// Temperatures of the most active station over the trailing twelve months
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    tag = "climate",
    responses(
        (status = 200, description = "Observed temperatures", body = [f64]),
        (status = 500, description = "Data store failure")
    )
)]
#[instrument(skip(state))]
async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<f64>>, StatusCode> {
    let temperatures = state
        .climate_service
        .active_station_temperatures()
        .await
        .map_err(|e| {
            error!("Failed to fetch active station temperatures: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(temperatures))
}

/// Min, average and max temperature from a start date onwards
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    tag = "climate",
    params(("start" = String, Path, description = "Start date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Temperature stats, null when nothing matched", body = TemperatureStats),
        (status = 500, description = "Data store failure")
    )
)]
#[instrument(skip(state), fields(start = %start))]
async fn temperature_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    stats_response(&state, &start, None).await
}

/// Min, average and max temperature between two dates, inclusive
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    tag = "climate",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
        ("end" = String, Path, description = "End date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Temperature stats, null when nothing matched", body = TemperatureStats),
        (status = 500, description = "Data store failure")
    )
)]
#[instrument(skip(state), fields(start = %start, end = %end))]
async fn temperature_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    stats_response(&state, &start, Some(&end)).await
}

async fn stats_response(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    let stats = state
        .temperature_service
        .compute_temperature_stats(start, end)
        .await
        .map_err(|e| {
            error!("Failed to aggregate temperatures from {} to {:?}: {}", start, end, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!(
        "Temperature stats from {} to {:?}: min={:?} avg={:?} max={:?}",
        start, end, stats.min_temperature, stats.avg_temperature, stats.max_temperature
    );

    Ok(Json(stats))
}
