// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::{i18n::I18nStore, locale::Language};
use crate::middleware::i18n::Locale;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Property not found")]
    PropertyNotFound,

    #[error("X_API_KEY environment variable is not set")]
    MissingApiKey,

    // Non-2xx answer from the property API.
    #[error("NainaHub API error: {0}")]
    Upstream(String),

    // Network failure, timeout or undecodable body.
    #[error("NainaHub request failed: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::PropertyNotFound => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::UpstreamRequest(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Key into the [`I18nStore`] for the message shown to visitors.
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "errors.validation",
            AppError::PropertyNotFound => "errors.property_not_found",
            AppError::MissingApiKey | AppError::Upstream(_) | AppError::UpstreamRequest(_) => {
                "errors.upstream_unavailable"
            }
            _ => "errors.internal",
        }
    }

    /// Converts into the response error, translated for the request language.
    /// Server-side failures are logged here so handlers only need `map_err`.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        self.localized(locale.0, store)
    }

    pub fn localized(self, lang: Language, store: &I18nStore) -> ApiError {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
        }

        let message = store.translate(lang, self.message_key());
        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(&errors)),
            _ => None,
        };

        ApiError { status, message, details }
    }
}

fn validation_details(errors: &validator::ValidationErrors) -> HashMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Error as it leaves the API: status plus a localized message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Used where no locale is at hand (middleware, startup): falls back to Thai,
// the site's default language.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.localized(Language::default(), &I18nStore::builtin()).into_response()
    }
}
