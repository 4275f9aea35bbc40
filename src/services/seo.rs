// src/services/seo.rs

use serde::Serialize;
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

use crate::{
    common::{i18n::I18nStore, locale::Language},
    config::SiteConfig,
    models::property::{ListingType, PropertyRecord},
    services::{presentation::PropertyCard, slug::property_slug},
};

const SCHEMA_CONTEXT: &str = "https://schema.org";
const DESCRIPTION_MAX_CHARS: usize = 160;
const ITEM_LIST_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub locale: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub site_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub alternates: Vec<AlternateLink>,
    pub open_graph: OpenGraph,
}

pub fn property_url(site: &SiteConfig, lang: Language, slug: &str) -> String {
    format!("{}/{}/property/{}", site.base_url, lang.code(), slug)
}

fn og_locale(lang: Language) -> String {
    lang.hreflang().replace('-', "_")
}

fn truncate_chars(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Every published language plus `x-default`, which points at Thai.
/// The slug is recomputed per language since its tokens are localized.
fn property_alternates(record: &PropertyRecord, site: &SiteConfig) -> Vec<AlternateLink> {
    let mut links: Vec<AlternateLink> = Language::ALL
        .iter()
        .map(|lang| AlternateLink {
            hreflang: lang.hreflang().to_string(),
            href: property_url(site, *lang, &property_slug(record, *lang)),
        })
        .collect();

    links.push(AlternateLink {
        hreflang: "x-default".into(),
        href: property_url(site, Language::Th, &property_slug(record, Language::Th)),
    });
    links
}

fn property_title(record: &PropertyRecord, lang: Language, i18n: &I18nStore) -> String {
    match record.title(lang) {
        "" => i18n.translate(lang, "seo.property_title"),
        t => t.to_string(),
    }
}

fn property_description(record: &PropertyRecord, lang: Language, i18n: &I18nStore) -> String {
    match record.description(lang) {
        Some(d) => truncate_chars(d, DESCRIPTION_MAX_CHARS),
        None => i18n.translate(lang, "seo.property_description"),
    }
}

pub fn property_metadata(
    record: &PropertyRecord,
    lang: Language,
    site: &SiteConfig,
    i18n: &I18nStore,
) -> PageMetadata {
    let title = format!("{} | {}", property_title(record, lang, i18n), site.name);
    let description = property_description(record, lang, i18n);
    let canonical = property_url(site, lang, &property_slug(record, lang));
    let image = record
        .primary_image()
        .map(str::to_string)
        .unwrap_or_else(|| site.default_image.clone());

    PageMetadata {
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical.clone(),
            image,
            locale: og_locale(lang),
            kind: "website".into(),
            site_name: site.name.clone(),
        },
        alternates: property_alternates(record, site),
        title,
        description,
        canonical,
    }
}

/// Metadata of the search page for one language.
pub fn search_metadata(total: usize, lang: Language, site: &SiteConfig, i18n: &I18nStore) -> PageMetadata {
    let title = format!("{} | {}", i18n.translate(lang, "seo.search_title"), site.name);
    let description = i18n.translate_count(lang, "seo.results_found", total as i64);
    let url_for = |l: Language| format!("{}/{}/search", site.base_url, l.code());

    let mut alternates: Vec<AlternateLink> = Language::ALL
        .iter()
        .map(|l| AlternateLink { hreflang: l.hreflang().to_string(), href: url_for(*l) })
        .collect();
    alternates.push(AlternateLink { hreflang: "x-default".into(), href: url_for(Language::Th) });

    PageMetadata {
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: url_for(lang),
            image: site.default_image.clone(),
            locale: og_locale(lang),
            kind: "website".into(),
            site_name: site.name.clone(),
        },
        canonical: url_for(lang),
        alternates,
        title,
        description,
    }
}

fn offer(price: f64, business_function: &str) -> Value {
    json!({
        "@type": "Offer",
        "price": price,
        "priceCurrency": "THB",
        "businessFunction": format!("http://purl.org/goodrelations/v1#{business_function}"),
        "availability": "https://schema.org/InStock",
    })
}

fn offers(record: &PropertyRecord) -> Option<Value> {
    let rent = record.rent_price().map(|p| offer(p, "LeaseOut"));
    let sale = record.sale_price().map(|p| offer(p, "Sell"));

    match record.listing_type() {
        ListingType::Both => Some(Value::Array(rent.into_iter().chain(sale).collect())),
        ListingType::Rent => rent,
        ListingType::Sale => sale,
        ListingType::Unlisted => None,
    }
}

fn postal_address(record: &PropertyRecord, lang: Language, i18n: &I18nStore) -> Value {
    let address = record.address();
    let mut out = Map::new();
    out.insert("@type".into(), json!("PostalAddress"));
    if let Some(sub) = address.sub_district.filter(|s| !s.is_empty()) {
        out.insert("streetAddress".into(), json!(sub));
    }
    if let Some(district) = address.district.filter(|s| !s.is_empty()) {
        out.insert("addressLocality".into(), json!(district));
    }
    let region = address
        .province
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| i18n.translate(lang, "seo.bangkok"));
    out.insert("addressRegion".into(), json!(region));
    out.insert("addressCountry".into(), json!("TH"));
    Value::Object(out)
}

fn coordinates(record: &PropertyRecord) -> Option<(f64, f64)> {
    match (record.latitude, record.longitude) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        _ => record
            .project
            .as_ref()
            .and_then(|p| p.project_latitude.zip(p.project_longitude)),
    }
}

/// `RealEstateListing` structured data for a property page.
pub fn property_json_ld(record: &PropertyRecord, lang: Language, site: &SiteConfig, i18n: &I18nStore) -> Value {
    let images: Vec<&str> = if record.image_urls.is_empty() {
        vec![site.default_image.as_str()]
    } else {
        record.image_urls.iter().map(String::as_str).collect()
    };

    let mut ld = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "RealEstateListing",
        "name": property_title(record, lang, i18n),
        "description": property_description(record, lang, i18n),
        "url": property_url(site, lang, &property_slug(record, lang)),
        "image": images,
        "inLanguage": lang.hreflang(),
        "address": postal_address(record, lang, i18n),
    });

    if let Some(offers) = offers(record) {
        ld["offers"] = offers;
    }
    if record.bed_room_num > 0 {
        ld["numberOfRooms"] = json!(record.bed_room_num);
    }
    if record.bath_room_num > 0 {
        ld["numberOfBathroomsTotal"] = json!(record.bath_room_num);
    }
    let area = record.area_sqm();
    if area > 0.0 {
        ld["floorSize"] = json!({ "@type": "QuantitativeValue", "value": area, "unitCode": "MTK" });
    }
    if let Some((lat, lng)) = coordinates(record) {
        ld["geo"] = json!({ "@type": "GeoCoordinates", "latitude": lat, "longitude": lng });
    }
    if let Some(updated) = record.updated_at {
        ld["dateModified"] = json!(updated.to_rfc3339());
    }
    if let Some(code) = record.agent_property_code.as_deref().filter(|c| !c.is_empty()) {
        ld["identifier"] = json!(code);
    }

    ld
}

/// `RealEstateAgent` structured data for the site itself.
pub fn organization_json_ld(site: &SiteConfig, lang: Language, i18n: &I18nStore) -> Value {
    let mut ld = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "RealEstateAgent",
        "name": site.name,
        "url": site.base_url,
        "logo": site.default_image,
        "image": site.default_image,
        "areaServed": i18n.translate(lang, "seo.bangkok"),
        "address": {
            "@type": "PostalAddress",
            "addressLocality": i18n.translate(lang, "seo.bangkok"),
            "addressCountry": "TH",
        },
    });
    if let Some(phone) = &site.phone {
        ld["telephone"] = json!(phone);
    }
    if let Some(email) = &site.email {
        ld["email"] = json!(email);
    }
    ld
}

/// `ItemList` of the first results of a search page.
pub fn search_results_json_ld(cards: &[PropertyCard], lang: Language, site: &SiteConfig) -> Value {
    let items: Vec<Value> = cards
        .iter()
        .take(ITEM_LIST_LIMIT)
        .enumerate()
        .map(|(i, card)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "url": property_url(site, lang, &card.slug),
                "name": card.title,
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ItemList",
        "numberOfItems": cards.len(),
        "itemListElement": items,
    })
}
