// src/models/catalog.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::property::PropertyType;

/// Listing filter as a visitor picks it ("rent" or "sale").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingFilter {
    Rent,
    Sale,
}

/// Search criteria. `None` means no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub search_text: Option<String>,
    pub project: Option<String>,
    pub property_type: Option<PropertyType>,
    pub listing: Option<ListingFilter>,
    pub bedrooms: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CatalogFilter {
    /// Same type, listing, bedroom and price constraints, any text or project.
    pub fn criteria_only(&self) -> Self {
        Self { search_text: None, project: None, ..self.clone() }
    }
}

/// Where type/listing/bedroom/price constraints are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// The upstream API already applied them; only text and project run locally.
    ClientOnly,
    /// Working on an unfiltered set; everything runs locally.
    Full,
}

/// One condo project as shown in the project tag list and on the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_code: String,
    pub project_name_en: String,
    pub project_name_th: String,
    pub count: usize,
    /// First image among the project's listings, empty if none has one.
    pub image: String,
}
