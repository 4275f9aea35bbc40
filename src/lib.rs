//src/lib.rs

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(allowed)
}

/// The full HTTP surface, ready to serve.
pub fn app(app_state: AppState) -> Router {
    let nainahub_routes = Router::new()
        .route("/properties", get(handlers::properties::list_properties))
        .route("/property/{slug}", get(handlers::properties::get_property))
        .route("/suggestions", get(handlers::properties::get_suggestions));

    let public_routes = Router::new()
        .route("/popular", get(handlers::properties::popular_properties))
        .route("/search", get(handlers::catalog::search))
        .route("/home", get(handlers::catalog::home));

    let seo_routes = Router::new()
        .route("/property/{slug}", get(handlers::seo::property_seo))
        .route("/organization", get(handlers::seo::organization));

    let cors = cors_layer(&app_state.config.cors_origins);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/nainahub", nainahub_routes)
        .nest("/api/public", public_routes)
        .nest("/api/seo", seo_routes)
        .route("/api/favorites/properties", post(handlers::properties::resolve_favorites))
        .route("/api/inquiries", post(handlers::inquiries::create_inquiry))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
