// src/services/presentation.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::{i18n::I18nStore, locale::Language},
    models::{
        extension::EnhancedProperty,
        property::{ListingType, PropertyStatus},
    },
    services::slug::property_slug,
};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// "3 days ago" style text. Future timestamps read as "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>, lang: Language, i18n: &I18nStore) -> String {
    let secs = (now - then).num_seconds();

    let (unit, singular, plural) = match secs {
        s if s < MINUTE => return i18n.translate(lang, "time.just_now"),
        s if s < HOUR => (MINUTE, "time.minute_ago", "time.minutes_ago"),
        s if s < DAY => (HOUR, "time.hour_ago", "time.hours_ago"),
        s if s < WEEK => (DAY, "time.day_ago", "time.days_ago"),
        s if s < MONTH => (WEEK, "time.week_ago", "time.weeks_ago"),
        s if s < YEAR => (MONTH, "time.month_ago", "time.months_ago"),
        _ => (YEAR, "time.year_ago", "time.years_ago"),
    };

    let count = secs / unit;
    if count == 1 {
        i18n.translate(lang, singular)
    } else {
        i18n.translate_count(lang, plural, count)
    }
}

/// What a listing card needs, already localized for one language.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCard {
    pub id: String,
    pub slug: String,
    pub code: Option<String>,
    pub title: String,
    pub address: String,
    pub property_type: String,
    pub listing_type: ListingType,
    pub rent_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_sqm: f64,
    pub image: Option<String>,
    pub status: PropertyStatus,
    pub project_code: Option<String>,
    pub updated_ago: Option<String>,
    pub is_recommended: bool,
    pub tags: Vec<String>,
}

impl PropertyCard {
    pub fn build(item: &EnhancedProperty, lang: Language, i18n: &I18nStore, now: DateTime<Utc>) -> Self {
        let p = &item.property;

        let title = match p.title(lang) {
            "" => i18n.translate(lang, "seo.unnamed_property"),
            t => t.to_string(),
        };

        Self {
            id: p.id.clone(),
            slug: property_slug(p, lang),
            code: p.agent_property_code.clone().filter(|c| !c.is_empty()),
            title,
            address: p.address_string(),
            property_type: p.property_type.as_str().to_string(),
            listing_type: p.listing_type(),
            rent_price: p.rent_price(),
            sale_price: p.sale_price(),
            bedrooms: p.bed_room_num,
            bathrooms: p.bath_room_num,
            area_sqm: p.area_sqm(),
            image: p.primary_image().map(str::to_string),
            status: p.status,
            project_code: p.effective_project_code().map(str::to_string),
            updated_ago: p.updated_at.map(|t| time_ago(t, now, lang, i18n)),
            is_recommended: item.is_recommended,
            tags: item.tags.clone(),
        }
    }

    pub fn build_all(items: &[EnhancedProperty], lang: Language, i18n: &I18nStore) -> Vec<Self> {
        let now = Utc::now();
        items.iter().map(|item| Self::build(item, lang, i18n, now)).collect()
    }
}

/// One-time notice (the listing popup). The client reports whether it was
/// already shown this session; nothing here reads any storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeState {
    pub shown: bool,
    pub show_popup: bool,
}

impl NoticeState {
    pub fn from_shown(shown: bool) -> Self {
        Self { shown, show_popup: !shown }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::property::{Project, PropertyRecord, PropertyType};
    use chrono::Duration;

    fn at(secs_ago: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc::now();
        (now - Duration::seconds(secs_ago), now)
    }

    #[test]
    fn time_ago_buckets() {
        let i18n = I18nStore::builtin();
        let cases = [
            (5, "just now"),
            (60, "1 minute ago"),
            (5 * MINUTE, "5 minutes ago"),
            (HOUR, "1 hour ago"),
            (3 * DAY, "3 days ago"),
            (2 * WEEK, "2 weeks ago"),
            (45 * DAY, "1 month ago"),
            (800 * DAY, "2 years ago"),
        ];
        for (secs, expected) in cases {
            let (then, now) = at(secs);
            assert_eq!(time_ago(then, now, Language::En, &i18n), expected, "{secs}s");
        }
    }

    #[test]
    fn time_ago_is_localized() {
        let i18n = I18nStore::builtin();
        let (then, now) = at(3 * DAY);
        assert_eq!(time_ago(then, now, Language::Th, &i18n), "3 วันที่แล้ว");
        assert_eq!(time_ago(then, now, Language::Zh, &i18n), "3天前");
    }

    #[test]
    fn future_timestamps_are_just_now() {
        let i18n = I18nStore::builtin();
        let now = Utc::now();
        assert_eq!(time_ago(now + Duration::hours(2), now, Language::En, &i18n), "just now");
    }

    #[test]
    fn card_projects_a_condo() {
        let i18n = I18nStore::builtin();
        let record = PropertyRecord {
            id: "p1".into(),
            agent_property_code: Some("SKY001".into()),
            property_type: PropertyType::Condo,
            rental_rate_num: Some(25000.0),
            room_size_num: Some(35.0),
            bed_room_num: 1,
            image_urls: vec!["https://img/1.jpg".into()],
            project: Some(Project {
                project_code: "PRJ1".into(),
                project_name_en: "The Skyline".into(),
                address_district: Some("Sathorn".into()),
                address_province: Some("Bangkok".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let item = EnhancedProperty::merge(record, None);

        let card = PropertyCard::build(&item, Language::En, &i18n, Utc::now());
        assert_eq!(card.slug, "for-rent-condo-the-skyline-SKY001");
        assert_eq!(card.title, "Property");
        assert_eq!(card.address, "Sathorn, Bangkok");
        assert_eq!(card.listing_type, ListingType::Rent);
        assert_eq!(card.area_sqm, 35.0);
        assert_eq!(card.image.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(card.project_code.as_deref(), Some("PRJ1"));
        assert_eq!(card.updated_ago, None);
    }

    #[test]
    fn notice_is_shown_once() {
        assert!(NoticeState::from_shown(false).show_popup);
        assert!(!NoticeState::from_shown(true).show_popup);
    }
}
