// src/services/inquiry_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, locale::Language},
    db::InquiryRepository,
    models::inquiry::Inquiry,
};

/// Submitted fields, already validated by the handler.
#[derive(Debug, Clone, Default)]
pub struct NewInquiry {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub property_type: Option<String>,
    pub property_id: Option<String>,
    pub message: Option<String>,
    pub kind: String,
    pub source: String,
}

fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct InquiryService {
    repo: InquiryRepository,
}

impl InquiryService {
    pub fn new(repo: InquiryRepository) -> Self {
        Self { repo }
    }

    pub async fn submit(&self, input: NewInquiry, locale: Language) -> Result<Inquiry, AppError> {
        let inquiry = Inquiry {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            email: clean(input.email),
            property_type: clean(input.property_type),
            property_id: clean(input.property_id),
            message: clean(input.message),
            kind: input.kind,
            source: input.source,
            locale,
            created_at: Utc::now(),
        };

        self.repo.append(&inquiry).await?;

        tracing::info!(
            "📨 Inquiry {} received ({} via {}, locale {})",
            inquiry.id,
            inquiry.kind,
            inquiry.source,
            inquiry.locale
        );

        Ok(inquiry)
    }
}
