//! Acceptance flows against the HTML UI, mirroring the original
//! browser-level scenarios: list, create, update, destroy.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use taproom::api::{create_router, handlers::AppState};
use taproom::TelemetryCollector;
use tower::ServiceExt;

fn app() -> Router {
    let telemetry = Arc::new(TelemetryCollector::with_config(
        std::env::temp_dir().join("taproom-ui-test-telemetry"),
        1000,
    ));
    create_router(Arc::new(AppState::new(telemetry)))
}

async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header("X-Forwarded-For", "ui-test")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

/// Submit a form post, returning (status, redirect location or body)
async fn post_form(app: &Router, path: &str, form_body: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("X-Forwarded-For", "ui-test")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, location, String::from_utf8_lossy(&bytes).to_string())
}

/// Pull the id out of the first Edit link on the index page
fn first_edit_id(html: &str) -> String {
    let marker = "href=\"/beers/";
    let start = html.find(marker).expect("index should contain an edit link") + marker.len();
    let rest = &html[start..];
    let end = rest.find("/edit").expect("edit link should end with /edit");
    rest[..end].to_string()
}

const SAMPLE_FORM: &str = "brand=Westvleteren&country=Belgium&quantity=12&style=Quadrupel";

#[tokio::test]
async fn test_visiting_the_index() {
    let app = app();
    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Beers</h1>"), "index should show the Beers heading");
}

#[tokio::test]
async fn test_creating_a_beer() {
    let app = app();

    let (status, location, _) = post_form(&app, "/beers", SAMPLE_FORM).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.expect("create should redirect");

    let (status, html) = get(&app, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Beer was successfully created"));
    assert!(html.contains("Westvleteren"));
}

#[tokio::test]
async fn test_updating_a_beer() {
    let app = app();
    post_form(&app, "/beers", SAMPLE_FORM).await;

    let (_, index_html) = get(&app, "/").await;
    let id = first_edit_id(&index_html);

    // Edit form is pre-filled
    let (status, edit_html) = get(&app, &format!("/beers/{}/edit", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(edit_html.contains("value=\"Westvleteren\""));

    let (status, location, _) = post_form(
        &app,
        &format!("/beers/{}", id),
        "brand=Westvleteren&country=Belgium&quantity=6&style=Quadrupel",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, html) = get(&app, &location.unwrap()).await;
    assert!(html.contains("Beer was successfully updated"));
    assert!(html.contains("<td>6</td>"));
}

#[tokio::test]
async fn test_destroying_a_beer() {
    let app = app();
    post_form(&app, "/beers", SAMPLE_FORM).await;

    let (_, index_html) = get(&app, "/").await;
    let id = first_edit_id(&index_html);

    let (status, location, _) = post_form(&app, &format!("/beers/{}/destroy", id), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, html) = get(&app, &location.unwrap()).await;
    assert!(html.contains("Beer was successfully destroyed"));
    assert!(!html.contains("Westvleteren"));
}

#[tokio::test]
async fn test_new_form_renders() {
    let app = app();
    let (status, html) = get(&app, "/beers/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("New Beer"));
    assert!(html.contains("name=\"brand\""));
    assert!(html.contains("name=\"country\""));
    assert!(html.contains("name=\"quantity\""));
    assert!(html.contains("name=\"style\""));
}

#[tokio::test]
async fn test_invalid_submission_rerenders_form() {
    let app = app();
    let (status, location, html) =
        post_form(&app, "/beers", "brand=&country=&quantity=-1&style=Lager").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(location.is_none(), "validation failure should not redirect");
    assert!(html.contains("prohibited this beer from being saved"));
    assert!(html.contains("Brand can&#39;t be blank"));

    // Nothing was created
    let (_, index_html) = get(&app, "/").await;
    assert!(index_html.contains("No beers yet."));
}

#[tokio::test]
async fn test_editing_unknown_beer_is_not_found() {
    let app = app();
    let (status, html) = get(&app, "/beers/00000000-0000-4000-8000-000000000000/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Beer not found"));
}
