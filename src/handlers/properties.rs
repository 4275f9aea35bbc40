// src/handlers/properties.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        extension::EnhancedProperty,
        property::{PropertiesEnvelope, SuggestionsEnvelope},
    },
    services::nainahub::FetchPropertiesParams,
};

/// "all" (any case) and blanks mean "no constraint".
pub(crate) fn constrained(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Free text and codes are taken literally; only blanks are dropped.
pub(crate) fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

// =============================================================================
//  LISTING PROXY
// =============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PropertiesQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Condo, Townhouse, ... or "all".
    pub property_type: Option<String>,
    /// "rent", "sale" or "all".
    pub listing_type: Option<String>,
    /// Bedroom count or "all".
    pub bedrooms: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub status: Option<String>,
    /// Defaults to true: this endpoint feeds back-office style listings.
    pub include_hidden: Option<bool>,
}

impl PropertiesQuery {
    pub fn to_fetch_params(&self) -> FetchPropertiesParams {
        // The upstream expects the literal "All" rather than no parameter.
        let property_type = match self.property_type.as_deref().map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("all") => Some("All".to_string()),
            _ => constrained(self.property_type.clone()),
        };

        FetchPropertiesParams {
            q: trimmed(&self.q),
            property_type,
            listing_type: constrained(self.listing_type.clone()),
            status: constrained(self.status.clone()),
            min_price: self.min_price,
            max_price: self.max_price,
            bedrooms: constrained(self.bedrooms.clone()).and_then(|b| b.parse().ok()),
            page: self.page,
            limit: self.limit,
        }
    }
}

// GET /api/nainahub/properties
#[utoipa::path(
    get,
    path = "/api/nainahub/properties",
    tag = "NainaHub",
    params(PropertiesQuery),
    responses(
        (status = 200, description = "Upstream page merged with local extensions", body = PropertiesEnvelope<EnhancedProperty>),
        (status = 502, description = "Property API unavailable")
    )
)]
pub async fn list_properties(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<PropertiesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = query.to_fetch_params();

    let envelope = app_state
        .property_service
        .list(&params, query.include_hidden.unwrap_or(true))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(envelope)))
}

// GET /api/nainahub/property/{slug}
#[utoipa::path(
    get,
    path = "/api/nainahub/property/{slug}",
    tag = "NainaHub",
    params(
        ("slug" = String, Path, description = "SEO slug (for-rent-condo-the-skyline-SKY001) or legacy UUID")
    ),
    responses(
        (status = 200, description = "Property", body = EnhancedProperty),
        (status = 404, description = "No visible property matches")
    )
)]
pub async fn get_property(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let property = app_state
        .property_service
        .find_by_segment(&slug)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(property)))
}

// =============================================================================
//  SUGGESTIONS
// =============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionsQuery {
    /// When present, narrows both lists to three matches for the request language.
    pub q: Option<String>,
}

// GET /api/nainahub/suggestions
#[utoipa::path(
    get,
    path = "/api/nainahub/suggestions",
    tag = "NainaHub",
    params(SuggestionsQuery),
    responses(
        (status = 200, description = "Autocomplete projects and locations", body = SuggestionsEnvelope),
        (status = 502, description = "success=false with empty lists")
    )
)]
pub async fn get_suggestions(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SuggestionsQuery>,
) -> Response {
    let service = &app_state.property_service;

    let result = match query.q {
        Some(q) => service
            .filtered_suggestions(&q, locale.0)
            .await
            .map(|data| SuggestionsEnvelope { success: true, data }),
        None => service.suggestions().await,
    };

    match result {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(e) => {
            tracing::error!("Error fetching suggestions: {}", e);
            let body = json!({
                "success": false,
                "error": app_state.i18n_store.translate(locale.0, "errors.suggestions_unavailable"),
                "data": { "projects": [], "locations": [] },
            });
            (e.status(), Json(body)).into_response()
        }
    }
}

// =============================================================================
//  POPULAR & FAVORITES
// =============================================================================

// GET /api/public/popular
#[utoipa::path(
    get,
    path = "/api/public/popular",
    tag = "Public",
    responses(
        (status = 200, description = "Recommended properties, or the first ten when none are", body = PropertiesEnvelope<EnhancedProperty>),
        (status = 502, description = "Property API unavailable")
    )
)]
pub async fn popular_properties(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let data = app_state
        .property_service
        .popular()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PropertiesEnvelope { success: true, data, pagination: None })))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesPayload {
    /// Contents of the `property-favorites` list, in the order it is kept.
    #[validate(length(max = 500, message = "too many favorites"))]
    #[schema(example = json!(["61d806d8-2bda-4559-b05b-7c9d0a99ad25"]))]
    pub ids: Vec<String>,
}

// POST /api/favorites/properties
#[utoipa::path(
    post,
    path = "/api/favorites/properties",
    tag = "Public",
    request_body = FavoritesPayload,
    responses(
        (status = 200, description = "Favorites that still exist, in favorites order", body = PropertiesEnvelope<EnhancedProperty>),
        (status = 400, description = "Invalid payload"),
        (status = 502, description = "Property API unavailable")
    )
)]
pub async fn resolve_favorites(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<FavoritesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let data = app_state
        .property_service
        .resolve_favorites(&payload.ids)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PropertiesEnvelope { success: true, data, pagination: None })))
}
