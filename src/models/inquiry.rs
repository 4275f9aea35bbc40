// src/models/inquiry.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::locale::Language;

/// A stored contact or "list your property" request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub property_type: Option<String>,
    pub property_id: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    pub locale: Language,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryReceipt {
    pub success: bool,
    pub id: Uuid,
}
