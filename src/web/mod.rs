//! HTML UI Module
//!
//! Server-rendered pages for the inventory: listing, creation and edit
//! forms, destroy buttons, and flash-style notices.

pub mod handlers;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::AppState;

/// UI routes, merged into the main router
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/beers", post(handlers::create))
        .route("/beers/new", get(handlers::new_form))
        .route("/beers/:id", post(handlers::update))
        .route("/beers/:id/edit", get(handlers::edit_form))
        .route("/beers/:id/destroy", post(handlers::destroy))
}
