// src/models/property.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::common::locale::{pick_localized, Language};

// The upstream API sends `null` for numbers and lists it has no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// --- ENUMS ---

/// Property type as the upstream API names it. Unknown names are kept
/// verbatim so they still round-trip and can be slugged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    #[default]
    Condo,
    Townhouse,
    SingleHouse,
    Villa,
    Land,
    Office,
    Store,
    Factory,
    Hotel,
    Building,
    Apartment,
    Other(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::SingleHouse => "SingleHouse",
            PropertyType::Villa => "Villa",
            PropertyType::Land => "Land",
            PropertyType::Office => "Office",
            PropertyType::Store => "Store",
            PropertyType::Factory => "Factory",
            PropertyType::Hotel => "Hotel",
            PropertyType::Building => "Building",
            PropertyType::Apartment => "Apartment",
            PropertyType::Other(name) => name,
        }
    }

    pub fn is_condo(&self) -> bool {
        matches!(self, PropertyType::Condo)
    }
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Condo" => PropertyType::Condo,
            "Townhouse" => PropertyType::Townhouse,
            "SingleHouse" => PropertyType::SingleHouse,
            "Villa" => PropertyType::Villa,
            "Land" => PropertyType::Land,
            "Office" => PropertyType::Office,
            "Store" => PropertyType::Store,
            "Factory" => PropertyType::Factory,
            "Hotel" => PropertyType::Hotel,
            "Building" => PropertyType::Building,
            "Apartment" => PropertyType::Apartment,
            _ => PropertyType::Other(value),
        }
    }
}

impl From<&str> for PropertyType {
    fn from(value: &str) -> Self {
        PropertyType::from(value.to_string())
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Pending,
    #[default]
    Available,
    Reserved,
    UnderContract,
    Sold,
    Rented,
    UnderMaintenance,
    OffMarket,
    #[serde(other)]
    Unknown,
}

impl PropertyStatus {
    /// Sold and rented listings only show up as closed deals.
    pub fn is_closed(self) -> bool {
        matches!(self, PropertyStatus::Sold | PropertyStatus::Rented)
    }
}

/// What a record is offered for, derived from its prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Rent,
    Sale,
    Both,
    Unlisted,
}

// --- PROJECT ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub project_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_name_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_name_th: String,
    pub project_location_text: Option<String>,
    pub project_location_text_en: Option<String>,
    pub project_latitude: Option<f64>,
    pub project_longitude: Option<f64>,
    // Condo addresses live on the project.
    pub address_sub_district: Option<String>,
    pub address_district: Option<String>,
    pub address_province: Option<String>,
}

impl Project {
    pub fn name(&self, lang: Language) -> &str {
        pick_localized(Some(self.project_name_th.as_str()), Some(self.project_name_en.as_str()), None, lang)
            .unwrap_or_default()
    }
}

// --- PROPERTY ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyRecord {
    pub id: String,
    pub project_property_code: Option<String>,
    pub agent_property_code: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    #[schema(value_type = String, example = "Condo")]
    pub property_type: PropertyType,

    #[serde(deserialize_with = "null_as_default")]
    pub property_title_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub property_title_th: String,
    pub description_en: Option<String>,
    pub description_th: Option<String>,
    pub property_location_text: Option<String>,
    pub property_location_text_en: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub bed_room_num: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub bath_room_num: u32,
    pub room_size_num: Option<f64>,
    pub usable_area_sqm: Option<f64>,
    pub rai: Option<f64>,
    pub ngan: Option<f64>,
    pub land_size_sqw: Option<f64>,
    pub floor: Option<String>,
    pub building: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,

    pub rental_rate_num: Option<f64>,
    pub sell_price_num: Option<f64>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // Addresses of everything that is not a condo.
    pub property_sub_district: Option<String>,
    pub property_district: Option<String>,
    pub property_province: Option<String>,

    pub project_code: Option<String>,
    pub project: Option<Project>,

    #[serde(deserialize_with = "null_as_default")]
    pub status: PropertyStatus,
    pub updated_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
}

/// Sub-district, district and province of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAddress {
    pub sub_district: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl AsRef<PropertyRecord> for PropertyRecord {
    fn as_ref(&self) -> &PropertyRecord {
        self
    }
}

impl PropertyRecord {
    pub fn rent_price(&self) -> Option<f64> {
        positive(self.rental_rate_num)
    }

    pub fn sale_price(&self) -> Option<f64> {
        positive(self.sell_price_num)
    }

    pub fn listing_type(&self) -> ListingType {
        match (self.rent_price(), self.sale_price()) {
            (Some(_), Some(_)) => ListingType::Both,
            (Some(_), None) => ListingType::Rent,
            (None, Some(_)) => ListingType::Sale,
            (None, None) => ListingType::Unlisted,
        }
    }

    /// Condo units sit on a project and take its area; everything else
    /// reports usable area.
    pub fn area_sqm(&self) -> f64 {
        positive(self.room_size_num)
            .or(positive(self.usable_area_sqm))
            .unwrap_or(0.0)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    pub fn effective_project_code(&self) -> Option<&str> {
        filled(&self.project_code)
            .or_else(|| self.project.as_ref().map(|p| p.project_code.as_str()).filter(|c| !c.is_empty()))
    }

    /// Condos MUST read the project address; other types MUST read their own fields.
    pub fn address(&self) -> PropertyAddress {
        if self.property_type.is_condo() {
            let project = self.project.as_ref();
            return PropertyAddress {
                sub_district: project.and_then(|p| p.address_sub_district.clone()),
                district: project.and_then(|p| p.address_district.clone()),
                province: project.and_then(|p| p.address_province.clone()),
            };
        }

        PropertyAddress {
            sub_district: self.property_sub_district.clone(),
            district: self.property_district.clone(),
            province: self.property_province.clone(),
        }
    }

    /// "District, Province", falling back to the free-form location text.
    pub fn address_string(&self) -> String {
        let address = self.address();
        let joined = [filled(&address.district), filled(&address.province)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        if !joined.is_empty() {
            return joined;
        }

        if self.property_type.is_condo() {
            if let Some(text) = self.project.as_ref().and_then(|p| filled(&p.project_location_text)) {
                return text.to_string();
            }
        }

        filled(&self.property_location_text)
            .map(str::to_string)
            .unwrap_or_default()
    }

    pub fn title(&self, lang: Language) -> &str {
        pick_localized(Some(self.property_title_th.as_str()), Some(self.property_title_en.as_str()), None, lang)
            .unwrap_or_default()
    }

    pub fn description(&self, lang: Language) -> Option<&str> {
        pick_localized(self.description_th.as_deref(), self.description_en.as_deref(), None, lang)
    }

    /// Lower-cased haystack for free-text search over titles, location texts
    /// and both address sets.
    pub fn searchable_text(&self) -> String {
        let project = self.project.as_ref();
        let fields = [
            Some(self.property_title_en.as_str()),
            Some(self.property_title_th.as_str()),
            self.property_location_text.as_deref(),
            self.property_location_text_en.as_deref(),
            project.map(|p| p.project_name_en.as_str()),
            project.map(|p| p.project_name_th.as_str()),
            project.and_then(|p| p.project_location_text.as_deref()),
            project.and_then(|p| p.project_location_text_en.as_deref()),
            self.property_district.as_deref(),
            self.property_sub_district.as_deref(),
            self.property_province.as_deref(),
            project.and_then(|p| p.address_district.as_deref()),
            project.and_then(|p| p.address_sub_district.as_deref()),
            project.and_then(|p| p.address_province.as_deref()),
        ];

        fields
            .into_iter()
            .flatten()
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

// --- UPSTREAM ENVELOPES ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionProject {
    pub name_en: String,
    pub name_th: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Condo,
    #[default]
    Property,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionLocation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_en: Option<String>,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SuggestionsData {
    pub projects: Vec<SuggestionProject>,
    pub locations: Vec<SuggestionLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: SuggestionsData,
}
