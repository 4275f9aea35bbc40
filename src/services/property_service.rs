// src/services/property_service.rs

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    common::{error::AppError, i18n::I18nStore, locale::Language},
    config::SiteConfig,
    models::{
        catalog::{CatalogFilter, FilterScope, ProjectSummary},
        extension::EnhancedProperty,
        property::{PropertiesEnvelope, PropertyRecord, SuggestionsData, SuggestionsEnvelope},
    },
    services::{
        catalog::{self, CATALOG_FETCH_LIMIT, HOME_PROJECT_LIMIT, LATEST_LISTINGS_LIMIT, POPULAR_FALLBACK_LIMIT},
        enrichment::EnrichmentService,
        nainahub::{require_success, FetchPropertiesParams, PropertySource},
        presentation::{NoticeState, PropertyCard},
        seo::{self, PageMetadata},
        slug::PropertyLookup,
    },
};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub locale: Language,
    pub total: usize,
    pub properties: Vec<PropertyCard>,
    pub projects: Vec<ProjectSummary>,
    pub metadata: PageMetadata,
    #[schema(value_type = Object)]
    pub json_ld: Value,
    /// Localized message when the listing could not be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub locale: Language,
    pub popular: Vec<PropertyCard>,
    pub closed_deals: Vec<PropertyCard>,
    pub projects: Vec<ProjectSummary>,
    pub latest: Vec<PropertyCard>,
    pub notice: NoticeState,
    #[schema(value_type = Object)]
    pub organization_json_ld: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySeo {
    pub metadata: PageMetadata,
    #[schema(value_type = Object)]
    pub json_ld: Value,
}

#[derive(Clone)]
pub struct PropertyService {
    source: Arc<dyn PropertySource>,
    enrichment: EnrichmentService,
    site: SiteConfig,
}

impl PropertyService {
    pub fn new(source: Arc<dyn PropertySource>, enrichment: EnrichmentService, site: SiteConfig) -> Self {
        Self { source, enrichment, site }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    async fn fetch(&self, params: &FetchPropertiesParams) -> Result<PropertiesEnvelope<PropertyRecord>, AppError> {
        let envelope = self.source.fetch_properties(params).await?;
        require_success(envelope.success, "properties")?;
        Ok(envelope)
    }

    async fn catalog_records(&self) -> Result<Vec<PropertyRecord>, AppError> {
        Ok(self.fetch(&FetchPropertiesParams::with_limit(CATALOG_FETCH_LIMIT)).await?.data)
    }

    /// Upstream page merged with local extensions, pagination passed through.
    pub async fn list(
        &self,
        params: &FetchPropertiesParams,
        include_hidden: bool,
    ) -> Result<PropertiesEnvelope<EnhancedProperty>, AppError> {
        let envelope = self.fetch(params).await?;
        Ok(PropertiesEnvelope {
            success: envelope.success,
            data: self.enrichment.enhance(envelope.data, include_hidden),
            pagination: envelope.pagination,
        })
    }

    /// Every visible record, unfiltered.
    pub async fn catalog(&self) -> Result<Vec<EnhancedProperty>, AppError> {
        Ok(self.enrichment.enhance(self.catalog_records().await?, false))
    }

    /// Resolves a URL segment (slug or legacy UUID) to one visible record.
    pub async fn find_by_segment(&self, segment: &str) -> Result<EnhancedProperty, AppError> {
        let lookup = PropertyLookup::from_segment(segment);
        tracing::debug!("Resolving property segment {} as {:?}", segment, lookup);

        self.catalog()
            .await?
            .into_iter()
            .find(|p| lookup.matches(&p.property))
            .ok_or(AppError::PropertyNotFound)
    }

    pub async fn suggestions(&self) -> Result<SuggestionsEnvelope, AppError> {
        let envelope = self.source.fetch_suggestions().await?;
        require_success(envelope.success, "suggestions")?;
        Ok(envelope)
    }

    /// Autocomplete lists narrowed to `q`, three of each at most.
    pub async fn filtered_suggestions(&self, q: &str, lang: Language) -> Result<SuggestionsData, AppError> {
        let envelope = self.suggestions().await?;
        Ok(catalog::filter_suggestions(&envelope.data, q, lang))
    }

    /// Recommended records, or the first few when nothing is recommended.
    pub async fn popular(&self) -> Result<Vec<EnhancedProperty>, AppError> {
        Ok(self.pick_popular(self.catalog_records().await?))
    }

    fn pick_popular(&self, records: Vec<PropertyRecord>) -> Vec<EnhancedProperty> {
        let recommended = self.enrichment.recommended(records.clone());
        if !recommended.is_empty() {
            return recommended;
        }
        let active = catalog::active_properties(&self.enrichment.enhance(records, false));
        active.into_iter().take(POPULAR_FALLBACK_LIMIT).collect()
    }

    pub async fn search_view(&self, filter: &CatalogFilter, lang: Language, i18n: &I18nStore) -> SearchView {
        let (items, error) = match self.catalog().await {
            Ok(items) => (items, None),
            Err(e) => {
                tracing::error!("Search view without data: {}", e);
                (Vec::new(), Some(i18n.translate(lang, e.message_key())))
            }
        };

        let results = catalog::filter_catalog(&items, filter, FilterScope::Full);
        // Project tags count what the other criteria match, whatever project is picked.
        let matching = catalog::filter_catalog(&items, &filter.criteria_only(), FilterScope::Full);
        let projects = catalog::project_summaries(&matching, None);
        let properties = PropertyCard::build_all(&results, lang, i18n);

        SearchView {
            locale: lang,
            total: properties.len(),
            metadata: seo::search_metadata(properties.len(), lang, &self.site, i18n),
            json_ld: seo::search_results_json_ld(&properties, lang, &self.site),
            properties,
            projects,
            error,
        }
    }

    pub async fn home_view(&self, lang: Language, notice_shown: bool, i18n: &I18nStore) -> HomeView {
        let (records, error) = match self.catalog_records().await {
            Ok(records) => (records, None),
            Err(e) => {
                tracing::error!("Home view without data: {}", e);
                (Vec::new(), Some(i18n.translate(lang, e.message_key())))
            }
        };

        let popular = self.pick_popular(records.clone());
        let items = self.enrichment.enhance(records, false);
        let active = catalog::active_properties(&items);

        HomeView {
            locale: lang,
            popular: PropertyCard::build_all(&popular, lang, i18n),
            closed_deals: PropertyCard::build_all(&catalog::closed_deals(&items), lang, i18n),
            projects: catalog::project_summaries(&active, Some(HOME_PROJECT_LIMIT)),
            latest: PropertyCard::build_all(&catalog::latest_listings(&active, LATEST_LISTINGS_LIMIT), lang, i18n),
            notice: NoticeState::from_shown(notice_shown),
            organization_json_ld: seo::organization_json_ld(&self.site, lang, i18n),
            error,
        }
    }

    /// Favorite ids resolved to records, in favorites order. Ids that no
    /// longer exist upstream are skipped.
    pub async fn resolve_favorites(&self, ids: &[String]) -> Result<Vec<EnhancedProperty>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let by_id: HashMap<String, EnhancedProperty> = self
            .catalog()
            .await?
            .into_iter()
            .map(|p| (p.property.id.clone(), p))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    pub async fn property_seo(&self, segment: &str, lang: Language, i18n: &I18nStore) -> Result<PropertySeo, AppError> {
        let item = self.find_by_segment(segment).await?;
        Ok(PropertySeo {
            metadata: seo::property_metadata(&item.property, lang, &self.site, i18n),
            json_ld: seo::property_json_ld(&item.property, lang, &self.site, i18n),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::db::ExtensionRepository;
    use crate::models::{catalog::ListingFilter, property::Project};
    use crate::services::nainahub::StaticSource;

    // Answers 200 with `success: false`, as the upstream does for some failures.
    struct RefusingSource;

    #[async_trait]
    impl PropertySource for RefusingSource {
        async fn fetch_properties(
            &self,
            _params: &FetchPropertiesParams,
        ) -> Result<PropertiesEnvelope<PropertyRecord>, AppError> {
            Ok(PropertiesEnvelope { success: false, data: Vec::new(), pagination: None })
        }

        async fn fetch_suggestions(&self) -> Result<SuggestionsEnvelope, AppError> {
            Ok(SuggestionsEnvelope { success: false, data: SuggestionsData::default() })
        }

        fn source_name(&self) -> &'static str {
            "refusing"
        }
    }

    fn service(source: impl PropertySource + 'static) -> PropertyService {
        PropertyService::new(
            Arc::new(source),
            EnrichmentService::new(ExtensionRepository::new(Vec::new())),
            SiteConfig::default(),
        )
    }

    fn listing(id: &str, project: &str, rent: Option<f64>, sale: Option<f64>) -> PropertyRecord {
        PropertyRecord {
            id: id.into(),
            agent_property_code: Some(id.to_uppercase()),
            project_code: Some(project.into()),
            project: Some(Project { project_code: project.into(), ..Default::default() }),
            rental_rate_num: rent,
            sell_price_num: sale,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn unsuccessful_upstream_is_not_an_empty_catalog() {
        let service = service(RefusingSource);
        let i18n = I18nStore::builtin();

        let view = service.search_view(&CatalogFilter::default(), Language::En, &i18n).await;
        assert_eq!(view.total, 0);
        assert_eq!(view.error, Some(i18n.translate(Language::En, "errors.upstream_unavailable")));

        let err = service.find_by_segment("for-rent-condo-x-SKY001").await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_GATEWAY);

        assert!(service.suggestions().await.is_err());
        assert!(service.home_view(Language::Th, false, &i18n).await.error.is_some());
    }

    #[tokio::test]
    async fn project_tags_follow_listing_filter() {
        let service = service(StaticSource::new(vec![
            listing("r1", "RENTONLY", Some(12000.0), None),
            listing("r2", "RENTONLY", Some(15000.0), None),
            listing("s1", "SALEPRJ", None, Some(2_500_000.0)),
        ]));
        let filter = CatalogFilter { listing: Some(ListingFilter::Sale), ..Default::default() };

        let view = service.search_view(&filter, Language::En, &I18nStore::builtin()).await;
        assert_eq!(view.total, 1);

        let tags: Vec<(&str, usize)> = view.projects.iter().map(|p| (p.project_code.as_str(), p.count)).collect();
        assert_eq!(tags, [("SALEPRJ", 1)]);
    }

    #[tokio::test]
    async fn picking_a_project_keeps_the_other_tags() {
        let service = service(StaticSource::new(vec![
            listing("a1", "ALPHA", Some(12000.0), None),
            listing("b1", "BETA", Some(15000.0), None),
        ]));
        let filter = CatalogFilter { project: Some("ALPHA".into()), ..Default::default() };

        let view = service.search_view(&filter, Language::En, &I18nStore::builtin()).await;
        assert_eq!(view.total, 1);
        assert_eq!(view.projects.len(), 2);
    }
}
