// src/services/nainahub.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::common::error::AppError;
use crate::config::Config;
use crate::models::property::{Pagination, PropertiesEnvelope, PropertyRecord, SuggestionsData, SuggestionsEnvelope};

const API_KEY_HEADER: &str = "x-api-key";

/// Query parameters of the upstream property listing endpoint.
/// Zero and empty values are left out of the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchPropertiesParams {
    pub q: Option<String>,
    /// Upstream spelling: "Condo", ..., or "All".
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub bedrooms: Option<u32>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl FetchPropertiesParams {
    pub fn with_limit(limit: u32) -> Self {
        Self { limit: Some(limit), ..Default::default() }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let text = [
            ("q", &self.q),
            ("propertyType", &self.property_type),
            ("listingType", &self.listing_type),
            ("status", &self.status),
        ];
        for (key, value) in text {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }

        let numbers = [
            ("minPrice", self.min_price),
            ("maxPrice", self.max_price),
            ("bedrooms", self.bedrooms.map(u64::from)),
            ("page", self.page.map(u64::from)),
            ("limit", self.limit.map(u64::from)),
        ];
        for (key, value) in numbers {
            if let Some(value) = value.filter(|v| *v > 0) {
                pairs.push((key, value.to_string()));
            }
        }

        pairs
    }

    /// Stable identity of the request, used as the cache key.
    pub fn cache_key(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// The upstream answers some failures with 200 and `success: false`; those
/// must not pass for an empty result.
pub fn require_success(success: bool, endpoint: &str) -> Result<(), AppError> {
    if success {
        Ok(())
    } else {
        Err(AppError::Upstream(format!("{endpoint} answered success=false")))
    }
}

/// Where property data comes from. The HTTP client is the production
/// implementation; tests plug in fixed data.
#[async_trait]
pub trait PropertySource: Send + Sync {
    async fn fetch_properties(
        &self,
        params: &FetchPropertiesParams,
    ) -> Result<PropertiesEnvelope<PropertyRecord>, AppError>;

    async fn fetch_suggestions(&self) -> Result<SuggestionsEnvelope, AppError>;

    fn source_name(&self) -> &'static str;
}

/// Client for the NainaHub public property API.
#[derive(Clone)]
pub struct NainaHubClient {
    client: Client,
    api_url: String,
    suggestions_url: String,
    api_key: Option<String>,
    user_id: String,
}

impl NainaHubClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.nainahub_api_url.clone(),
            suggestions_url: config.nainahub_suggestions_url.clone(),
            api_key: config.api_key.clone(),
            user_id: config.nainahub_user_id.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        mut query: Vec<(&'static str, String)>,
    ) -> Result<T, AppError> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingApiKey)?;

        // Every call is scoped to the agency's account.
        query.insert(0, ("userId", self.user_id.clone()));

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(&query)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PropertySource for NainaHubClient {
    async fn fetch_properties(
        &self,
        params: &FetchPropertiesParams,
    ) -> Result<PropertiesEnvelope<PropertyRecord>, AppError> {
        let envelope: PropertiesEnvelope<PropertyRecord> =
            self.get_json(&self.api_url, params.query_pairs()).await?;
        require_success(envelope.success, "properties")?;

        tracing::info!("NainaHub returned {} properties", envelope.data.len());
        Ok(envelope)
    }

    async fn fetch_suggestions(&self) -> Result<SuggestionsEnvelope, AppError> {
        let envelope: SuggestionsEnvelope = self.get_json(&self.suggestions_url, Vec::new()).await?;
        require_success(envelope.success, "suggestions")?;
        Ok(envelope)
    }

    fn source_name(&self) -> &'static str {
        "nainahub"
    }
}

/// Fixed in-memory data, for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    properties: Vec<PropertyRecord>,
    suggestions: Option<SuggestionsData>,
    unavailable: bool,
}

impl StaticSource {
    pub fn new(properties: Vec<PropertyRecord>) -> Self {
        Self { properties, ..Default::default() }
    }

    pub fn with_suggestions(mut self, suggestions: SuggestionsData) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// A source whose every call fails like an unreachable upstream.
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Default::default() }
    }
}

#[async_trait]
impl PropertySource for StaticSource {
    async fn fetch_properties(
        &self,
        params: &FetchPropertiesParams,
    ) -> Result<PropertiesEnvelope<PropertyRecord>, AppError> {
        if self.unavailable {
            return Err(AppError::Upstream("503 Service Unavailable".into()));
        }

        let total = self.properties.len();
        let limit = params.limit.filter(|l| *l > 0).map_or(total.max(1), |l| l as usize);
        let page = params.page.filter(|p| *p > 0).unwrap_or(1) as usize;

        let data = self.properties.iter().skip((page - 1) * limit).take(limit).cloned().collect();

        Ok(PropertiesEnvelope {
            success: true,
            data,
            pagination: Some(Pagination {
                total: total as u64,
                page: page as u32,
                limit: limit as u32,
                total_pages: total.div_ceil(limit) as u32,
            }),
        })
    }

    async fn fetch_suggestions(&self) -> Result<SuggestionsEnvelope, AppError> {
        match (&self.suggestions, self.unavailable) {
            (Some(data), false) => Ok(SuggestionsEnvelope { success: true, data: data.clone() }),
            _ => Err(AppError::Upstream("503 Service Unavailable".into())),
        }
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}
