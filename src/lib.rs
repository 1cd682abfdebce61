//! Taproom Library
//!
//! Self-contained beer inventory service:
//! - HTML UI at the site root (listing, forms, confirmation notices)
//! - Versioned JSON API under /api/v1
//! - In-memory concurrent store, no external database

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod store;
pub mod telemetry;
pub mod web;

pub use config::ServerConfig;
pub use domain::{Beer, BeerPatch, NewBeer};
pub use errors::{AppError, AppResult, ErrorCode};
pub use store::{BeerStore, StoreStats};
pub use telemetry::{MutationType, TelemetryCollector, TelemetryEvent, TelemetryStats};
