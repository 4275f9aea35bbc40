// src/config.rs

use std::{env, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    common::i18n::I18nStore,
    db::{ExtensionRepository, InquiryRepository},
    services::{
        cache::CachedSource,
        enrichment::EnrichmentService,
        inquiry_service::InquiryService,
        nainahub::{NainaHubClient, PropertySource},
        property_service::PropertyService,
    },
};

/// Public identity of the site, used for canonical URLs and structured data.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub name: String,
    pub default_image: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://propertybyta168.com".into(),
            name: "propertybyta168".into(),
            default_image: "https://propertybyta168.com/og-image.jpg".into(),
            phone: None,
            email: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub nainahub_api_url: String,
    pub nainahub_suggestions_url: String,
    pub nainahub_user_id: String,
    pub site: SiteConfig,
    pub port: u16,
    pub extensions_path: PathBuf,
    pub inquiries_path: PathBuf,
    pub cache_ttl_secs: u64,
    pub suggestions_ttl_secs: u64,
    pub http_timeout_secs: u64,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            nainahub_api_url: "https://nainahub.com/api/public/properties".into(),
            nainahub_suggestions_url: "https://nainahub.com/api/public/properties/suggestions".into(),
            nainahub_user_id: "61d806d8-2bda-4559-b05b-7c9d0a99ad25".into(),
            site: SiteConfig::default(),
            port: 3000,
            extensions_path: PathBuf::from("data/property-extensions.json"),
            inquiries_path: PathBuf::from("data/inquiries.jsonl"),
            cache_ttl_secs: 60,
            suggestions_ttl_secs: 300,
            http_timeout_secs: 10,
            cors_origins: Vec::new(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw.trim().parse().with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

impl Config {
    /// Reads the process environment (after `.env`), keeping defaults for
    /// anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_key = var("X_API_KEY");
        if api_key.is_none() {
            tracing::warn!("X_API_KEY is not set; every NainaHub request will fail");
        }

        let site = SiteConfig {
            base_url: var("SITE_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.site.base_url),
            name: var("SITE_NAME").unwrap_or(defaults.site.name),
            default_image: var("SITE_DEFAULT_IMAGE").unwrap_or(defaults.site.default_image),
            phone: var("SITE_PHONE"),
            email: var("SITE_EMAIL"),
        };

        Ok(Self {
            api_key,
            nainahub_api_url: var("NAINAHUB_API_URL").unwrap_or(defaults.nainahub_api_url),
            nainahub_suggestions_url: var("NAINAHUB_SUGGESTIONS_URL")
                .unwrap_or(defaults.nainahub_suggestions_url),
            nainahub_user_id: var("NAINAHUB_USER_ID").unwrap_or(defaults.nainahub_user_id),
            site,
            port: parsed("PORT", defaults.port)?,
            extensions_path: var("EXTENSIONS_PATH").map(PathBuf::from).unwrap_or(defaults.extensions_path),
            inquiries_path: var("INQUIRIES_PATH").map(PathBuf::from).unwrap_or(defaults.inquiries_path),
            cache_ttl_secs: parsed("CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            suggestions_ttl_secs: parsed("SUGGESTIONS_TTL_SECS", defaults.suggestions_ttl_secs)?,
            http_timeout_secs: parsed("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            cors_origins: var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,
    pub property_service: PropertyService,
    pub inquiry_service: InquiryService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let client = NainaHubClient::new(&config)?;
        let source: Arc<dyn PropertySource> = Arc::new(CachedSource::new(
            Arc::new(client),
            Duration::from_secs(config.cache_ttl_secs),
            Duration::from_secs(config.suggestions_ttl_secs),
        ));

        let extensions = ExtensionRepository::load(&config.extensions_path).await;

        tracing::info!(
            "✅ Property source ready: {} ({} local extensions)",
            source.source_name(),
            extensions.len()
        );

        Ok(Self::from_parts(config, source, extensions))
    }

    /// Wires the services around an already-built source. Tests use this with
    /// an in-memory source.
    pub fn from_parts(config: Config, source: Arc<dyn PropertySource>, extensions: ExtensionRepository) -> Self {
        let i18n_store = Arc::new(I18nStore::builtin());
        let enrichment = EnrichmentService::new(extensions);
        let property_service = PropertyService::new(source, enrichment, config.site.clone());
        let inquiry_service = InquiryService::new(InquiryRepository::new(config.inquiries_path.clone()));

        Self {
            config: Arc::new(config),
            i18n_store,
            property_service,
            inquiry_service,
        }
    }
}
