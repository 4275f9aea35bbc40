// src/common/locale.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The three languages the site is published in.
///
/// Every place that needs to branch on the visitor's language goes through
/// this type, so the fallback rules live in one spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Th,
    En,
    Zh,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Th, Language::En, Language::Zh];

    /// Parses a locale code or a language tag ("en", "en-US", "zh_CN").
    /// Anything unrecognized resolves to Thai.
    pub fn parse(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_default()
    }

    /// Like [`Language::parse`] but reports unsupported tags instead of
    /// defaulting, so callers can keep looking (e.g. down an Accept-Language list).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "th" => Some(Language::Th),
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Th => "th",
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Region-qualified tag used for `hreflang` alternates.
    pub fn hreflang(self) -> &'static str {
        match self {
            Language::Th => "th-TH",
            Language::En => "en-US",
            Language::Zh => "zh-CN",
        }
    }

    /// English and Chinese pages read the English side of Thai/English pairs first.
    pub fn prefers_english(self) -> bool {
        !matches!(self, Language::Th)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Picks the field matching `lang`, falling back zh -> en -> th and en <-> th.
/// Blank strings count as missing.
pub fn pick_localized<'a>(
    th: Option<&'a str>,
    en: Option<&'a str>,
    zh: Option<&'a str>,
    lang: Language,
) -> Option<&'a str> {
    let (th, en, zh) = (non_empty(th), non_empty(en), non_empty(zh));
    match lang {
        Language::Th => th.or(en).or(zh),
        Language::En => en.or(th).or(zh),
        Language::Zh => zh.or(en).or(th),
    }
}
