//! API Request/Response Types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Beer, BeerPatch, NewBeer};
use crate::errors::AppError;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "API_BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "API_INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: err.source.as_ref().map(|s| s.to_string()),
        }
    }
}

// ============================================
// Beers
// ============================================

#[derive(Debug, Deserialize)]
pub struct CreateBeerRequest {
    pub brand: String,
    pub country: String,
    #[serde(default)]
    pub quantity: i64,
    pub style: String,
}

impl From<CreateBeerRequest> for NewBeer {
    fn from(req: CreateBeerRequest) -> Self {
        Self {
            brand: req.brand,
            country: req.country,
            quantity: req.quantity,
            style: req.style,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBeerRequest {
    pub brand: Option<String>,
    pub country: Option<String>,
    pub quantity: Option<i64>,
    pub style: Option<String>,
}

impl From<UpdateBeerRequest> for BeerPatch {
    fn from(req: UpdateBeerRequest) -> Self {
        Self {
            brand: req.brand,
            country: req.country,
            quantity: req.quantity,
            style: req.style,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BeerData {
    pub id: Uuid,
    pub brand: String,
    pub country: String,
    pub quantity: i64,
    pub style: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Beer> for BeerData {
    fn from(beer: Beer) -> Self {
        Self {
            id: beer.id,
            brand: beer.brand,
            country: beer.country,
            quantity: beer.quantity,
            style: beer.style,
            created_at: beer.created_at.to_rfc3339(),
            updated_at: beer.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BeerListData {
    pub total: usize,
    pub beers: Vec<BeerData>,
}

// ============================================
// Stats / Telemetry
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub beers_in_stock: usize,
    pub beers_created: u64,
    pub beers_updated: u64,
    pub beers_destroyed: u64,
    pub requests_served: u64,
    pub avg_latency_ms: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
