// src/docs.rs

use utoipa::OpenApi;

use crate::common::locale::Language;
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Property portal API",
        description = "Localized (th/en/zh) property listings backed by NainaHub. \
                       Responses follow `?locale=`, then `Accept-Language`, then Thai."
    ),
    paths(
        // --- NainaHub proxy ---
        handlers::properties::list_properties,
        handlers::properties::get_property,
        handlers::properties::get_suggestions,

        // --- Public views ---
        handlers::properties::popular_properties,
        handlers::properties::resolve_favorites,
        handlers::catalog::search,
        handlers::catalog::home,

        // --- SEO ---
        handlers::seo::property_seo,
        handlers::seo::organization,

        // --- Inquiries ---
        handlers::inquiries::create_inquiry,
    ),
    components(
        schemas(
            Language,

            // --- Properties ---
            models::property::PropertyRecord,
            models::property::Project,
            models::property::PropertyStatus,
            models::property::ListingType,
            models::property::PropertyAddress,
            models::property::Pagination,
            models::property::SuggestionProject,
            models::property::SuggestionKind,
            models::property::SuggestionLocation,
            models::property::SuggestionsData,
            models::property::SuggestionsEnvelope,
            models::extension::PropertyExtension,
            models::extension::EnhancedProperty,
            models::catalog::ProjectSummary,
            models::catalog::ListingFilter,

            // --- Views ---
            services::presentation::PropertyCard,
            services::presentation::NoticeState,
            services::seo::PageMetadata,
            services::seo::AlternateLink,
            services::seo::OpenGraph,
            services::property_service::SearchView,
            services::property_service::HomeView,
            services::property_service::PropertySeo,

            // --- Inquiries ---
            models::inquiry::InquiryReceipt,

            // --- Payloads ---
            handlers::properties::FavoritesPayload,
            handlers::inquiries::InquiryPayload,
        )
    ),
    tags(
        (name = "NainaHub", description = "Upstream listings merged with local extensions"),
        (name = "Public", description = "Page views for the website"),
        (name = "SEO", description = "Page metadata and structured data"),
        (name = "Inquiries", description = "Contact and list-your-property requests")
    )
)]
pub struct ApiDoc;
