//! HTML UI Handlers
//!
//! Form-driven flow mirroring the JSON surface: mutations land as form
//! posts and bounce back to the index with a confirmation notice in the
//! query string.

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use super::pages::{self, FormValues};
use crate::api::handlers::AppState;
use crate::domain::{BeerPatch, NewBeer};
use crate::telemetry::{MutationType, TelemetryEvent};

pub const NOTICE_CREATED: &str = "Beer was successfully created";
pub const NOTICE_UPDATED: &str = "Beer was successfully updated";
pub const NOTICE_DESTROYED: &str = "Beer was successfully destroyed";

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub notice: Option<String>,
}

/// Raw form payload; every field arrives as text
#[derive(Debug, Default, Deserialize)]
pub struct BeerForm {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub style: String,
}

impl BeerForm {
    /// Convert to a normalized NewBeer, collecting every validation
    /// failure. A blank quantity counts as zero.
    fn into_new_beer(self) -> Result<NewBeer, (Vec<String>, FormValues)> {
        let values = FormValues {
            brand: self.brand.clone(),
            country: self.country.clone(),
            quantity: self.quantity.clone(),
            style: self.style.clone(),
        };

        let mut errors = Vec::new();
        let quantity_raw = self.quantity.trim();
        let quantity = if quantity_raw.is_empty() {
            0
        } else {
            quantity_raw.parse::<i64>().unwrap_or_else(|_| {
                errors.push("Quantity is not a number".to_string());
                0
            })
        };

        let new = NewBeer {
            brand: self.brand,
            country: self.country,
            quantity,
            style: self.style,
        }
        .normalized();
        errors.extend(new.check());

        if errors.is_empty() {
            Ok(new)
        } else {
            Err((errors, values))
        }
    }
}

fn redirect_with_notice(notice: &str) -> Redirect {
    Redirect::to(&format!("/?notice={}", notice.replace(' ', "%20")))
}

fn not_found(raw_id: &str) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page(raw_id)))
}

// ============================================
// Pages
// ============================================

/// GET / - inventory listing
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let start = Instant::now();
    let beers = state.store.list();
    state
        .telemetry
        .record_request(start.elapsed().as_millis() as u64);
    Html(pages::index_page(&beers, query.notice.as_deref()))
}

/// GET /beers/new - creation form
pub async fn new_form() -> Html<String> {
    Html(pages::form_page(
        "New Beer",
        "/beers",
        "Create Beer",
        &FormValues::empty(),
        &[],
    ))
}

/// GET /beers/:id/edit - edit form, pre-filled
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let parsed: Uuid = id.parse().map_err(|_| not_found(&id))?;
    let beer = state.store.get(parsed).ok_or_else(|| not_found(&id))?;

    Ok(Html(pages::form_page(
        "Editing Beer",
        &format!("/beers/{}", beer.id),
        "Update Beer",
        &FormValues::from(&beer),
        &[],
    )))
}

// ============================================
// Mutations
// ============================================

/// POST /beers - create from form
pub async fn create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<BeerForm>,
) -> Result<Redirect, (StatusCode, Html<String>)> {
    let start = Instant::now();

    let new = form.into_new_beer().map_err(|(errors, values)| {
        warn!("Rejected form create: {}", errors.join(", "));
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::form_page(
                "New Beer",
                "/beers",
                "Create Beer",
                &values,
                &errors,
            )),
        )
    })?;

    let beer = state.store.create(new);
    info!("Created beer {} ({}) via form", beer.brand, beer.id);

    state.telemetry.record_mutation(TelemetryEvent::new(
        MutationType::Created,
        start.elapsed().as_millis() as u64,
        format!("{} ({})", beer.brand, beer.id),
    ));

    Ok(redirect_with_notice(NOTICE_CREATED))
}

/// POST /beers/:id - update from form
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<BeerForm>,
) -> Result<Redirect, (StatusCode, Html<String>)> {
    let start = Instant::now();

    let parsed: Uuid = id.parse().map_err(|_| not_found(&id))?;
    if state.store.get(parsed).is_none() {
        return Err(not_found(&id));
    }

    let new = form.into_new_beer().map_err(|(errors, values)| {
        warn!("Rejected form update for {}: {}", parsed, errors.join(", "));
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::form_page(
                "Editing Beer",
                &format!("/beers/{}", parsed),
                "Update Beer",
                &values,
                &errors,
            )),
        )
    })?;

    // The form always posts the full field set
    let patch = BeerPatch {
        brand: Some(new.brand),
        country: Some(new.country),
        quantity: Some(new.quantity),
        style: Some(new.style),
    };

    let beer = state.store.update(parsed, patch).map_err(|_| not_found(&id))?;
    info!("Updated beer {} ({}) via form", beer.brand, beer.id);

    state.telemetry.record_mutation(TelemetryEvent::new(
        MutationType::Updated,
        start.elapsed().as_millis() as u64,
        format!("{} ({})", beer.brand, beer.id),
    ));

    Ok(redirect_with_notice(NOTICE_UPDATED))
}

/// POST /beers/:id/destroy - remove an entry
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, (StatusCode, Html<String>)> {
    let start = Instant::now();

    let parsed: Uuid = id.parse().map_err(|_| not_found(&id))?;
    let beer = state.store.destroy(parsed).map_err(|_| not_found(&id))?;
    info!("Destroyed beer {} ({}) via form", beer.brand, beer.id);

    state.telemetry.record_mutation(TelemetryEvent::new(
        MutationType::Destroyed,
        start.elapsed().as_millis() as u64,
        format!("{} ({})", beer.brand, beer.id),
    ));

    Ok(redirect_with_notice(NOTICE_DESTROYED))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(brand: &str, quantity: &str) -> BeerForm {
        BeerForm {
            brand: brand.to_string(),
            country: "Belgium".to_string(),
            quantity: quantity.to_string(),
            style: "Tripel".to_string(),
        }
    }

    #[test]
    fn test_form_conversion_valid() {
        let new = form("Karmeliet", "12").into_new_beer().expect("valid form");
        assert_eq!(new.brand, "Karmeliet");
        assert_eq!(new.quantity, 12);
    }

    #[test]
    fn test_form_blank_quantity_is_zero() {
        let new = form("Karmeliet", "  ").into_new_beer().expect("valid form");
        assert_eq!(new.quantity, 0);
    }

    #[test]
    fn test_form_bad_quantity_collected_with_other_errors() {
        let bad = BeerForm {
            brand: String::new(),
            country: "Belgium".to_string(),
            quantity: "a lot".to_string(),
            style: "Tripel".to_string(),
        };
        let (errors, values) = bad.into_new_beer().expect_err("should fail");
        assert!(errors.contains(&"Quantity is not a number".to_string()));
        assert!(errors.contains(&"Brand can't be blank".to_string()));
        // Raw input preserved for re-render
        assert_eq!(values.quantity, "a lot");
    }

    #[test]
    fn test_redirect_notice_encoding() {
        let redirect = format!("/?notice={}", NOTICE_CREATED.replace(' ', "%20"));
        assert_eq!(redirect, "/?notice=Beer%20was%20successfully%20created");
    }
}
