// src/models/extension.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::property::PropertyRecord;

/// Site-local metadata layered on top of an upstream listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyExtension {
    pub property_id: String,
    pub is_recommended: bool,
    pub is_hidden: bool,
    pub tags: Vec<String>,
    pub sort_order: Option<i32>,
}

/// Upstream record with its extension merged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedProperty {
    #[serde(flatten)]
    pub property: PropertyRecord,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl EnhancedProperty {
    pub fn merge(property: PropertyRecord, extension: Option<&PropertyExtension>) -> Self {
        match extension {
            Some(ext) => Self {
                property,
                is_recommended: ext.is_recommended,
                is_hidden: ext.is_hidden,
                tags: ext.tags.clone(),
                sort_order: ext.sort_order,
            },
            None => Self {
                property,
                is_recommended: false,
                is_hidden: false,
                tags: Vec::new(),
                sort_order: None,
            },
        }
    }
}

impl AsRef<PropertyRecord> for EnhancedProperty {
    fn as_ref(&self) -> &PropertyRecord {
        &self.property
    }
}
