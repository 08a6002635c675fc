//! End-to-end tests for the catalog service.
//!
//! Runs the real router, clients and registry against wiremock
//! stand-ins for the two downstream services.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use matinee_connect::{JsonClient, ServiceRegistry, StaticRegistry};
use movie_catalog_service::catalog::CatalogService;
use movie_catalog_service::clients::{
    MOVIE_INFO_SERVICE, MovieInfoClient, RATING_SERVICE, RatingsClient,
};
use movie_catalog_service::server::{AppState, create_router};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_router(rating_url: &str, movie_info_url: &str, call_timeout: Duration) -> Router {
    let registry: Arc<dyn ServiceRegistry> = Arc::new(
        StaticRegistry::new()
            .with_route(RATING_SERVICE, rating_url)
            .with_route(MOVIE_INFO_SERVICE, movie_info_url),
    );
    let client = JsonClient::new(call_timeout).unwrap();

    let catalog = Arc::new(CatalogService::new(
        Arc::new(RatingsClient::new(Arc::clone(&registry), client.clone())),
        Arc::new(MovieInfoClient::new(registry, client)),
        call_timeout,
    ));

    create_router(AppState {
        version: "test".to_string(),
        catalog,
    })
}

async fn get_catalog(router: Router, user_id: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/catalog/{user_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn mount_user_ratings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/ratings-data/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ratings": [
                {"movieId": "123", "rating": 4},
                {"movieId": "456", "rating": 5}
            ]
        })))
        .mount(server)
        .await;
}

fn movie_body(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": format!("Synopsis of {name}")
    })
}

#[tokio::test]
async fn catalog_enriches_every_rating_in_order() {
    let ratings = MockServer::start().await;
    let movies = MockServer::start().await;

    mount_user_ratings(&ratings).await;
    Mock::given(method("GET"))
        .and(path("/movies/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_body("123", "Inception")))
        .mount(&movies)
        .await;
    Mock::given(method("GET"))
        .and(path("/movies/456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_body("456", "Memento")))
        .mount(&movies)
        .await;

    let router = make_router(&ratings.uri(), &movies.uri(), Duration::from_secs(1));
    let (status, json) = get_catalog(router, "alice").await;

    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Inception");
    assert_eq!(items[0]["rating"], 4);
    assert_eq!(items[1]["name"], "Memento");
    assert_eq!(items[1]["rating"], 5);
}

#[tokio::test]
async fn failed_movie_lookup_degrades_only_that_item() {
    let ratings = MockServer::start().await;
    let movies = MockServer::start().await;

    mount_user_ratings(&ratings).await;
    Mock::given(method("GET"))
        .and(path("/movies/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_body("123", "Inception")))
        .mount(&movies)
        .await;
    Mock::given(method("GET"))
        .and(path("/movies/456"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&movies)
        .await;

    let router = make_router(&ratings.uri(), &movies.uri(), Duration::from_secs(1));
    let (status, json) = get_catalog(router, "alice").await;

    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Inception");
    assert_eq!(items[1]["name"], "No Movie");
    assert_eq!(items[1]["description"], "");
    assert_eq!(items[1]["rating"], 0);
}

#[tokio::test]
async fn rating_service_outage_degrades_to_placeholder_catalog() {
    // No mock mounted for the ratings route; wiremock answers 404 and
    // the movie lookup for the sentinel rating finds nothing either.
    let ratings = MockServer::start().await;
    let movies = MockServer::start().await;

    let router = make_router(&ratings.uri(), &movies.uri(), Duration::from_secs(1));
    let (status, json) = get_catalog(router, "alice").await;

    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "No Movie");
    assert_eq!(items[0]["rating"], 0);
}

#[tokio::test]
async fn slow_movie_lookup_times_out_into_placeholder() {
    let ratings = MockServer::start().await;
    let movies = MockServer::start().await;

    mount_user_ratings(&ratings).await;
    Mock::given(method("GET"))
        .and(path("/movies/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_body("123", "Inception")))
        .mount(&movies)
        .await;
    Mock::given(method("GET"))
        .and(path("/movies/456"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(movie_body("456", "Memento"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&movies)
        .await;

    let router = make_router(&ratings.uri(), &movies.uri(), Duration::from_millis(200));
    let (status, json) = get_catalog(router, "alice").await;

    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items[0]["name"], "Inception");
    assert_eq!(items[1]["name"], "No Movie");
}
