// src/services/slug.rs
//
// SEO slugs for property pages.
//
// Format: {listingType}-{propertyType}-{location}-{CODE}
//   th: ให้เช่า-คอนโด-เดอะ-สกายไลน์-SKY001
//   en: for-rent-condo-the-skyline-SKY001
//   zh: 出租-公寓-the-skyline-SKY001
//
// Only the trailing code is used for lookups; everything before it is for
// humans and search engines.

use uuid::Uuid;

use crate::common::locale::Language;
use crate::models::property::{ListingType, PropertyRecord, PropertyType};

/// The fields of a record the slug is built from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugSource<'a> {
    pub agent_property_code: Option<&'a str>,
    pub property_type: &'a str,
    pub rental_rate_num: Option<f64>,
    pub sell_price_num: Option<f64>,
    pub project_name_th: Option<&'a str>,
    pub project_name_en: Option<&'a str>,
    pub property_title_th: Option<&'a str>,
    pub property_title_en: Option<&'a str>,
    pub property_district: Option<&'a str>,
}

impl<'a> From<&'a PropertyRecord> for SlugSource<'a> {
    fn from(p: &'a PropertyRecord) -> Self {
        Self {
            agent_property_code: p.agent_property_code.as_deref(),
            property_type: p.property_type.as_str(),
            rental_rate_num: p.rental_rate_num,
            sell_price_num: p.sell_price_num,
            project_name_th: p.project.as_ref().map(|pr| pr.project_name_th.as_str()),
            project_name_en: p.project.as_ref().map(|pr| pr.project_name_en.as_str()),
            property_title_th: Some(p.property_title_th.as_str()),
            property_title_en: Some(p.property_title_en.as_str()),
            property_district: p.property_district.as_deref(),
        }
    }
}

struct ListingWords {
    rent: &'static str,
    sale: &'static str,
    both: &'static str,
    property: &'static str,
}

fn listing_words(lang: Language) -> ListingWords {
    match lang {
        Language::Th => ListingWords { rent: "ให้เช่า", sale: "ขาย", both: "ให้เช่า-ขาย", property: "ทรัพย์สิน" },
        Language::En => ListingWords { rent: "for-rent", sale: "for-sale", both: "for-rent-sale", property: "property" },
        Language::Zh => ListingWords { rent: "出租", sale: "出售", both: "出租出售", property: "房产" },
    }
}

fn listing_kind(rent: Option<f64>, sale: Option<f64>) -> ListingType {
    let has_rent = rent.is_some_and(|v| v > 0.0);
    let has_sale = sale.is_some_and(|v| v > 0.0);
    match (has_rent, has_sale) {
        (true, true) => ListingType::Both,
        (true, false) => ListingType::Rent,
        (false, true) => ListingType::Sale,
        (false, false) => ListingType::Unlisted,
    }
}

pub fn listing_type_token(rent: Option<f64>, sale: Option<f64>, lang: Language) -> &'static str {
    let words = listing_words(lang);
    match listing_kind(rent, sale) {
        ListingType::Both => words.both,
        ListingType::Rent => words.rent,
        ListingType::Sale => words.sale,
        ListingType::Unlisted => words.property,
    }
}

fn known_type_token(property_type: &PropertyType, lang: Language) -> Option<&'static str> {
    use PropertyType::*;

    let (th, en, zh) = match property_type {
        Condo => ("คอนโด", "condo", "公寓"),
        SingleHouse => ("บ้านเดี่ยว", "house", "别墅"),
        Townhouse => ("ทาวน์เฮ้าส์", "townhouse", "联排别墅"),
        Villa => ("วิลล่า", "villa", "豪华别墅"),
        Land => ("ที่ดิน", "land", "土地"),
        Office => ("สำนักงาน", "office", "办公室"),
        Store => ("อาคารพาณิชย์", "commercial", "商铺"),
        Factory => ("โรงงาน", "factory", "工厂"),
        Hotel => ("โรงแรม", "hotel", "酒店"),
        Building => ("อาคาร", "building", "大楼"),
        Apartment | Other(_) => return None,
    };

    Some(match lang {
        Language::Th => th,
        Language::En => en,
        Language::Zh => zh,
    })
}

/// Localized property type; types without a translation use their lower-cased name.
pub fn property_type_token(property_type: &str, lang: Language) -> String {
    known_type_token(&PropertyType::from(property_type), lang)
        .map(str::to_string)
        .unwrap_or_else(|| property_type.to_lowercase())
}

fn is_slug_char(ch: char) -> bool {
    matches!(ch, '\u{0E00}'..='\u{0E7F}') || ch.is_ascii_lowercase() || ch.is_ascii_digit()
}

/// Lower-cases, turns whitespace/underscore runs into single hyphens and
/// keeps only Thai letters, ASCII letters, digits and hyphens.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for ch in lowered.trim().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_hyphen = true;
        } else if is_slug_char(ch) {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        }
        // Dropped characters neither break nor start a hyphen run.
    }

    out
}

fn first_filled<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|v| !v.trim().is_empty())
}

fn location_name<'a>(p: &SlugSource<'a>, lang: Language) -> &'a str {
    let chain = if lang.prefers_english() {
        [p.project_name_en, p.project_name_th, p.property_title_en, p.property_district]
    } else {
        [p.project_name_th, p.project_name_en, p.property_title_th, p.property_district]
    };
    first_filled(&chain).unwrap_or("property")
}

/// Builds the slug for `lang`. Pure: same input, same output.
pub fn generate_property_slug(p: &SlugSource<'_>, lang: Language) -> String {
    let code = p
        .agent_property_code
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("P")
        .to_uppercase();

    [
        listing_type_token(p.rental_rate_num, p.sell_price_num, lang).to_string(),
        property_type_token(p.property_type, lang),
        slugify(location_name(p, lang)),
        code,
    ]
    .join("-")
}

pub fn property_slug(record: &PropertyRecord, lang: Language) -> String {
    generate_property_slug(&SlugSource::from(record), lang)
}

/// The property code is always the segment after the last hyphen.
pub fn extract_property_code(slug: &str) -> String {
    slug.rsplit('-').next().unwrap_or_default().to_uppercase()
}

/// At least four segments and an alphanumeric trailing code.
pub fn is_valid_property_slug(slug: &str) -> bool {
    if slug.matches('-').count() < 3 {
        return false;
    }
    let code = slug.rsplit('-').next().unwrap_or_default();
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Hyphenated 8-4-4-4-12 hex form only; legacy URLs carried the raw id.
pub fn is_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

/// How an incoming `/property/{segment}` should be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyLookup {
    Id(String),
    Code(String),
}

impl PropertyLookup {
    pub fn from_segment(segment: &str) -> Self {
        if is_uuid(segment) {
            PropertyLookup::Id(segment.to_string())
        } else {
            PropertyLookup::Code(extract_property_code(segment))
        }
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        match self {
            PropertyLookup::Id(id) => record.id.eq_ignore_ascii_case(id),
            PropertyLookup::Code(code) => record
                .agent_property_code
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(code)),
        }
    }
}
