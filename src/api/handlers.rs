//! API Request Handlers

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use super::types::*;
use crate::errors::AppError;
use crate::store::BeerStore;
use crate::telemetry::{MutationType, TelemetryCollector, TelemetryEvent};

/// Shared application state
pub struct AppState {
    pub store: BeerStore,
    pub telemetry: Arc<TelemetryCollector>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(telemetry: Arc<TelemetryCollector>) -> Self {
        Self {
            store: BeerStore::new(),
            telemetry,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Map an AppError to the status-coded envelope the JSON surface returns
fn error_reply(err: &AppError, start: Instant) -> (StatusCode, Json<ApiResponse<()>>) {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(
            ApiError::from(err),
            start.elapsed().as_secs_f64() * 1000.0,
        )),
    )
}

/// Parse a path segment into a beer id, rejecting malformed input as 400
fn parse_id(raw: &str, start: Instant) -> Result<Uuid, (StatusCode, Json<ApiResponse<()>>)> {
    raw.parse::<Uuid>()
        .map_err(|_| error_reply(&AppError::invalid_id(raw), start))
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// List
// ============================================

pub async fn list_beers(State(state): State<Arc<AppState>>) -> Json<ApiResponse<BeerListData>> {
    let start = Instant::now();

    let beers: Vec<BeerData> = state.store.list().into_iter().map(BeerData::from).collect();
    let data = BeerListData {
        total: beers.len(),
        beers,
    };

    state
        .telemetry
        .record_request(start.elapsed().as_millis() as u64);

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// Create
// ============================================

pub async fn create_beer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBeerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BeerData>>), (StatusCode, Json<ApiResponse<()>>)> {
    let start = Instant::now();

    let new = crate::domain::NewBeer::from(req).validated().map_err(|e| {
        warn!("Rejected create: {}", e);
        error_reply(&e, start)
    })?;

    let beer = state.store.create(new);
    info!("Created beer {} ({})", beer.brand, beer.id);

    state.telemetry.record_mutation(TelemetryEvent::new(
        MutationType::Created,
        start.elapsed().as_millis() as u64,
        format!("{} ({})", beer.brand, beer.id),
    ));

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            BeerData::from(beer),
            start.elapsed().as_secs_f64() * 1000.0,
        )),
    ))
}

// ============================================
// Update
// ============================================

pub async fn update_beer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBeerRequest>,
) -> Result<Json<ApiResponse<BeerData>>, (StatusCode, Json<ApiResponse<()>>)> {
    let start = Instant::now();

    let id = parse_id(&id, start)?;
    let patch = crate::domain::BeerPatch::from(req).validated().map_err(|e| {
        warn!("Rejected update for {}: {}", id, e);
        error_reply(&e, start)
    })?;

    let beer = state
        .store
        .update(id, patch)
        .map_err(|e| error_reply(&e, start))?;
    info!("Updated beer {} ({})", beer.brand, beer.id);

    state.telemetry.record_mutation(TelemetryEvent::new(
        MutationType::Updated,
        start.elapsed().as_millis() as u64,
        format!("{} ({})", beer.brand, beer.id),
    ));

    Ok(Json(ApiResponse::success(
        BeerData::from(beer),
        start.elapsed().as_secs_f64() * 1000.0,
    )))
}

// ============================================
// Destroy
// ============================================

pub async fn destroy_beer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BeerData>>, (StatusCode, Json<ApiResponse<()>>)> {
    let start = Instant::now();

    let id = parse_id(&id, start)?;
    let beer = state
        .store
        .destroy(id)
        .map_err(|e| error_reply(&e, start))?;
    info!("Destroyed beer {} ({})", beer.brand, beer.id);

    state.telemetry.record_mutation(TelemetryEvent::new(
        MutationType::Destroyed,
        start.elapsed().as_millis() as u64,
        format!("{} ({})", beer.brand, beer.id),
    ));

    Ok(Json(ApiResponse::success(
        BeerData::from(beer),
        start.elapsed().as_secs_f64() * 1000.0,
    )))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let stats = state.telemetry.get_stats();
    let store_stats = state.store.stats();

    let data = StatsData {
        beers_in_stock: store_stats.entries,
        beers_created: stats.beers_created,
        beers_updated: stats.beers_updated,
        beers_destroyed: stats.beers_destroyed,
        requests_served: stats.requests_served,
        avg_latency_ms: stats.avg_latency_ms,
        uptime_seconds: state.uptime_seconds(),
        api_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}
