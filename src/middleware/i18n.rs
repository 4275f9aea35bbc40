// src/middleware/i18n.rs

use axum::extract::{FromRequestParts, Query};
use axum::http::{header, request::Parts};
use serde::Deserialize;

use crate::common::locale::Language;

// Language extractor: `?locale=` wins, then Accept-Language, then Thai.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale(pub Language);

#[derive(Debug, Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        // The frontend routes are /{locale}/..., so it forwards the locale explicitly.
        let from_query = Query::<LocaleQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.locale)
            .map(|tag| Language::parse(&tag));

        if let Some(lang) = from_query {
            return Ok(Locale(lang));
        }

        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                // First tag in preference order that we actually publish.
                accept_language::parse(header_str)
                    .iter()
                    .find_map(|tag| Language::from_tag(tag))
            })
            .unwrap_or_default();

        Ok(Locale(lang))
    }
}
