// src/common/i18n.rs

use std::collections::HashMap;

use crate::common::locale::Language;

// key, th, en, zh
const MESSAGES: &[(&str, &str, &str, &str)] = &[
    // --- Errors ---
    ("errors.validation", "ข้อมูลบางช่องไม่ถูกต้อง", "One or more fields are invalid.", "部分字段无效。"),
    ("errors.property_not_found", "ไม่พบทรัพย์สินนี้", "Property not found.", "未找到该房产。"),
    ("errors.upstream_unavailable", "ไม่สามารถโหลดข้อมูลทรัพย์สินได้ กรุณาลองใหม่อีกครั้ง", "Failed to load properties. Please try again.", "无法加载房产信息，请稍后重试。"),
    ("errors.suggestions_unavailable", "ไม่สามารถโหลดคำแนะนำการค้นหาได้", "Failed to fetch suggestions.", "无法获取搜索建议。"),
    ("errors.inquiry_failed", "ส่งข้อมูลไม่สำเร็จ กรุณาลองใหม่อีกครั้ง", "Could not submit your inquiry. Please try again.", "提交失败，请重试。"),
    ("errors.internal", "เกิดข้อผิดพลาดที่ไม่คาดคิด", "An unexpected error occurred.", "发生意外错误。"),

    // --- Time ago ---
    ("time.just_now", "เมื่อสักครู่", "just now", "刚刚"),
    ("time.minute_ago", "1 นาทีที่แล้ว", "1 minute ago", "1分钟前"),
    ("time.minutes_ago", "{count} นาทีที่แล้ว", "{count} minutes ago", "{count}分钟前"),
    ("time.hour_ago", "1 ชั่วโมงที่แล้ว", "1 hour ago", "1小时前"),
    ("time.hours_ago", "{count} ชั่วโมงที่แล้ว", "{count} hours ago", "{count}小时前"),
    ("time.day_ago", "1 วันที่แล้ว", "1 day ago", "1天前"),
    ("time.days_ago", "{count} วันที่แล้ว", "{count} days ago", "{count}天前"),
    ("time.week_ago", "1 สัปดาห์ที่แล้ว", "1 week ago", "1周前"),
    ("time.weeks_ago", "{count} สัปดาห์ที่แล้ว", "{count} weeks ago", "{count}周前"),
    ("time.month_ago", "1 เดือนที่แล้ว", "1 month ago", "1个月前"),
    ("time.months_ago", "{count} เดือนที่แล้ว", "{count} months ago", "{count}个月前"),
    ("time.year_ago", "1 ปีที่แล้ว", "1 year ago", "1年前"),
    ("time.years_ago", "{count} ปีที่แล้ว", "{count} years ago", "{count}年前"),

    // --- SEO fallbacks ---
    ("seo.property_title", "รายละเอียดทรัพย์สิน", "Property details", "房产详情"),
    ("seo.property_description", "ดูรายละเอียดอสังหาริมทรัพย์จาก propertybyta168 - บริการอสังหาริมทรัพย์ครบวงจร", "View property details from propertybyta168 - full-service real estate.", "在 propertybyta168 查看房产详情 - 一站式房地产服务。"),
    ("seo.search_title", "รวมอสังหาริมทรัพย์", "Properties", "房产列表"),
    ("seo.results_found", "พบ {count} รายการ", "{count} results", "共 {count} 条结果"),
    ("seo.for_rent", "ให้เช่า", "for rent", "出租"),
    ("seo.for_sale", "ขาย", "for sale", "出售"),
    ("seo.bangkok", "กรุงเทพฯ", "Bangkok", "曼谷"),
    ("seo.unnamed_property", "อสังหาริมทรัพย์", "Property", "房产"),
];

/// Translation table for every message the API produces itself.
/// UI strings belong to the frontend; this only covers errors, relative
/// times and SEO fallbacks.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<(Language, &'static str), &'static str>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl I18nStore {
    pub fn builtin() -> Self {
        let mut messages = HashMap::with_capacity(MESSAGES.len() * 3);
        for (key, th, en, zh) in MESSAGES {
            messages.insert((Language::Th, *key), *th);
            messages.insert((Language::En, *key), *en);
            messages.insert((Language::Zh, *key), *zh);
        }
        Self { messages }
    }

    /// Looks up `key` for `lang`, falling back to English and finally to the key itself.
    pub fn translate(&self, lang: Language, key: &str) -> String {
        self.messages
            .get(&(lang, key))
            .or_else(|| self.messages.get(&(Language::En, key)))
            .map(|m| m.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Same as `translate`, substituting `{count}`.
    pub fn translate_count(&self, lang: Language, key: &str, count: i64) -> String {
        self.translate(lang, key).replace("{count}", &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_all_three_languages() {
        let store = I18nStore::builtin();
        for (key, ..) in MESSAGES {
            for lang in Language::ALL {
                assert_ne!(store.translate(lang, key), *key, "{key} missing for {lang}");
            }
        }
    }

    #[test]
    fn unknown_key_echoes_back() {
        let store = I18nStore::builtin();
        assert_eq!(store.translate(Language::Zh, "nope.nothing"), "nope.nothing");
    }

    #[test]
    fn count_interpolation() {
        let store = I18nStore::builtin();
        assert_eq!(store.translate_count(Language::En, "time.days_ago", 3), "3 days ago");
        assert_eq!(store.translate_count(Language::Zh, "time.days_ago", 3), "3天前");
    }
}
