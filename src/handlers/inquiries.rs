// src/handlers/inquiries.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::inquiry::InquiryReceipt,
    services::inquiry_service::NewInquiry,
};

// Trimmed before validation, so "   " fails a required field.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

// Forms post "" for untouched optional inputs.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}

fn default_kind() -> String {
    "contact".into()
}

fn default_source() -> String {
    "website".into()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPayload {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "required"))]
    #[schema(example = "Somchai")]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 6, max = 30, message = "invalid phone number"))]
    #[schema(example = "081-234-5678")]
    pub phone: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email(message = "invalid email"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "Condo")]
    pub property_type: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub property_id: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 2000, message = "message too long"))]
    pub message: Option<String>,

    /// "contact", "list-property", ...
    #[serde(rename = "type", default = "default_kind")]
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "list-property")]
    pub kind: String,

    /// Where the form lives: "popup", "contact-page", ...
    #[serde(default = "default_source")]
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "popup")]
    pub source: String,
}

impl From<InquiryPayload> for NewInquiry {
    fn from(p: InquiryPayload) -> Self {
        Self {
            name: p.name,
            phone: p.phone,
            email: p.email,
            property_type: p.property_type,
            property_id: p.property_id,
            message: p.message,
            kind: p.kind,
            source: p.source,
        }
    }
}

// POST /api/inquiries
#[utoipa::path(
    post,
    path = "/api/inquiries",
    tag = "Inquiries",
    request_body = InquiryPayload,
    responses(
        (status = 201, description = "Inquiry stored", body = InquiryReceipt),
        (status = 400, description = "Invalid fields, with per-field details"),
        (status = 500, description = "Could not be stored; safe to retry")
    )
)]
pub async fn create_inquiry(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<InquiryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let inquiry = app_state
        .inquiry_service
        .submit(payload.into(), locale.0)
        .await
        .map_err(|app_err| {
            let mut api_err = app_err.to_api_error(&locale, &app_state.i18n_store);
            api_err.message = app_state.i18n_store.translate(locale.0, "errors.inquiry_failed");
            api_err
        })?;

    Ok((StatusCode::CREATED, Json(InquiryReceipt { success: true, id: inquiry.id })))
}
