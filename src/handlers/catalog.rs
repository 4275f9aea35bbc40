// src/handlers/catalog.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    config::AppState,
    handlers::properties::{constrained, trimmed},
    middleware::i18n::Locale,
    models::{
        catalog::{CatalogFilter, ListingFilter},
        property::PropertyType,
    },
    services::property_service::{HomeView, SearchView},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free text matched against titles, project names and addresses.
    pub search: Option<String>,
    /// Project code.
    pub project: Option<String>,
    pub property_type: Option<String>,
    /// "rent", "sale" or "all".
    pub listing_type: Option<String>,
    pub bedrooms: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl SearchQuery {
    pub fn to_filter(&self) -> CatalogFilter {
        let listing = constrained(self.listing_type.clone()).and_then(|l| match l.to_ascii_lowercase().as_str() {
            "rent" => Some(ListingFilter::Rent),
            "sale" => Some(ListingFilter::Sale),
            _ => None,
        });

        CatalogFilter {
            search_text: trimmed(&self.search),
            project: trimmed(&self.project),
            property_type: constrained(self.property_type.clone()).map(PropertyType::from),
            listing,
            bedrooms: constrained(self.bedrooms.clone()).and_then(|b| b.parse().ok()),
            min_price: self.min_price.filter(|p| *p > 0.0),
            max_price: self.max_price.filter(|p| *p > 0.0),
        }
    }
}

// GET /api/public/search
#[utoipa::path(
    get,
    path = "/api/public/search",
    tag = "Public",
    params(SearchQuery, ("locale" = Option<String>, Query, description = "th, en or zh")),
    responses(
        (status = 200, description = "Search page view; `error` is set when the listing could not be loaded", body = SearchView)
    )
)]
pub async fn search(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let view = app_state
        .property_service
        .search_view(&query.to_filter(), locale.0, &app_state.i18n_store)
        .await;

    (StatusCode::OK, Json(view))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HomeQuery {
    /// Whether the one-time listing popup was already shown this session.
    pub popup_shown: Option<bool>,
}

// GET /api/public/home
#[utoipa::path(
    get,
    path = "/api/public/home",
    tag = "Public",
    params(HomeQuery, ("locale" = Option<String>, Query, description = "th, en or zh")),
    responses(
        (status = 200, description = "Home page view", body = HomeView)
    )
)]
pub async fn home(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let view = app_state
        .property_service
        .home_view(locale.0, query.popup_shown.unwrap_or(false), &app_state.i18n_store)
        .await;

    (StatusCode::OK, Json(view))
}
