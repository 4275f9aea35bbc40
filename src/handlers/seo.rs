// src/handlers/seo.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    services::{property_service::PropertySeo, seo},
};

// GET /api/seo/property/{slug}
#[utoipa::path(
    get,
    path = "/api/seo/property/{slug}",
    tag = "SEO",
    params(
        ("slug" = String, Path, description = "SEO slug or legacy UUID"),
        ("locale" = Option<String>, Query, description = "th, en or zh")
    ),
    responses(
        (status = 200, description = "Page metadata and RealEstateListing JSON-LD", body = PropertySeo),
        (status = 404, description = "No visible property matches")
    )
)]
pub async fn property_seo(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let seo = app_state
        .property_service
        .property_seo(&slug, locale.0, &app_state.i18n_store)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(seo)))
}

// GET /api/seo/organization
#[utoipa::path(
    get,
    path = "/api/seo/organization",
    tag = "SEO",
    params(("locale" = Option<String>, Query, description = "th, en or zh")),
    responses(
        (status = 200, description = "RealEstateAgent JSON-LD", body = serde_json::Value)
    )
)]
pub async fn organization(State(app_state): State<AppState>, locale: Locale) -> impl IntoResponse {
    let ld = seo::organization_json_ld(app_state.property_service.site(), locale.0, &app_state.i18n_store);
    (StatusCode::OK, Json(ld))
}
