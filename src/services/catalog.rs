// src/services/catalog.rs
//
// Search and listing views computed from an already-fetched set of records.
// No I/O happens here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::common::locale::{pick_localized, Language};
use crate::models::catalog::{CatalogFilter, FilterScope, ListingFilter, ProjectSummary};
use crate::models::property::{PropertyRecord, SuggestionsData};

/// The search page pulls the whole catalog and filters locally, because the
/// upstream text search does not look at location fields.
pub const CATALOG_FETCH_LIMIT: u32 = 1000;
pub const HOME_PROJECT_LIMIT: usize = 8;
pub const CLOSED_DEALS_LIMIT: usize = 10;
pub const LATEST_LISTINGS_LIMIT: usize = 8;
pub const POPULAR_FALLBACK_LIMIT: usize = 10;
pub const SUGGESTION_LIMIT: usize = 3;

fn matches_listing(record: &PropertyRecord, listing: ListingFilter) -> bool {
    match listing {
        ListingFilter::Rent => record.rent_price().is_some(),
        ListingFilter::Sale => record.sale_price().is_some(),
    }
}

fn matches_price(record: &PropertyRecord, filter: &CatalogFilter) -> bool {
    if filter.min_price.is_none() && filter.max_price.is_none() {
        return true;
    }

    let in_range = |price: f64| {
        filter.min_price.is_none_or(|min| price >= min) && filter.max_price.is_none_or(|max| price <= max)
    };

    let candidates = match filter.listing {
        Some(ListingFilter::Rent) => vec![record.rent_price()],
        Some(ListingFilter::Sale) => vec![record.sale_price()],
        None => vec![record.rent_price(), record.sale_price()],
    };

    candidates.into_iter().flatten().any(in_range)
}

/// Type, listing, bedroom and price constraints, for sets the upstream did not filter.
fn matches_criteria(record: &PropertyRecord, filter: &CatalogFilter) -> bool {
    if let Some(property_type) = &filter.property_type {
        if &record.property_type != property_type {
            return false;
        }
    }
    if let Some(listing) = filter.listing {
        if !matches_listing(record, listing) {
            return false;
        }
    }
    if let Some(bedrooms) = filter.bedrooms {
        if record.bed_room_num != bedrooms {
            return false;
        }
    }
    matches_price(record, filter)
}

fn matches_text_and_project(record: &PropertyRecord, needle: Option<&str>, project: Option<&str>) -> bool {
    if let Some(needle) = needle {
        if !record.searchable_text().contains(needle) {
            return false;
        }
    }
    if let Some(project) = project {
        if record.effective_project_code() != Some(project) {
            return false;
        }
    }
    true
}

/// Records still on the market; sold and rented ones are dropped.
pub fn active_properties<T>(items: &[T]) -> Vec<T>
where
    T: AsRef<PropertyRecord> + Clone,
{
    items
        .iter()
        .filter(|item| !item.as_ref().status.is_closed())
        .cloned()
        .collect()
}

/// The displayed subset, in input order. Closed deals never pass.
pub fn filter_catalog<T>(items: &[T], filter: &CatalogFilter, scope: FilterScope) -> Vec<T>
where
    T: AsRef<PropertyRecord> + Clone,
{
    let needle = filter
        .search_text
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let project = filter.project.as_deref().filter(|p| !p.is_empty());

    items
        .iter()
        .filter(|item| {
            let record = item.as_ref();
            !record.status.is_closed()
                && matches_text_and_project(record, needle.as_deref(), project)
                && (scope == FilterScope::ClientOnly || matches_criteria(record, filter))
        })
        .cloned()
        .collect()
}

/// One entry per project code in first-seen order, counting listings and
/// keeping the first image. Records without a project are skipped.
pub fn project_summaries<T>(items: &[T], limit: Option<usize>) -> Vec<ProjectSummary>
where
    T: AsRef<PropertyRecord>,
{
    let mut summaries: Vec<ProjectSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let record = item.as_ref();
        let Some(project) = record.project.as_ref() else { continue };
        let Some(code) = record.effective_project_code() else { continue };

        match index.get(code) {
            Some(&i) => summaries[i].count += 1,
            None => {
                index.insert(code.to_string(), summaries.len());
                summaries.push(ProjectSummary {
                    project_code: code.to_string(),
                    project_name_en: project.project_name_en.clone(),
                    project_name_th: project.project_name_th.clone(),
                    count: 1,
                    image: record.primary_image().unwrap_or_default().to_string(),
                });
            }
        }
    }

    if let Some(limit) = limit {
        summaries.truncate(limit);
    }
    summaries
}

pub fn closed_deals<T>(items: &[T]) -> Vec<T>
where
    T: AsRef<PropertyRecord> + Clone,
{
    items
        .iter()
        .filter(|item| item.as_ref().status.is_closed())
        .take(CLOSED_DEALS_LIMIT)
        .cloned()
        .collect()
}

/// Newest first; records without `updatedAt` sort as the epoch.
pub fn latest_listings<T>(items: &[T], limit: usize) -> Vec<T>
where
    T: AsRef<PropertyRecord> + Clone,
{
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| {
        std::cmp::Reverse(item.as_ref().updated_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
    });
    sorted.truncate(limit);
    sorted
}

/// Autocomplete: up to three projects and three locations whose localized
/// text contains `search_text`. An empty search matches everything.
pub fn filter_suggestions(data: &SuggestionsData, search_text: &str, lang: Language) -> SuggestionsData {
    let needle = search_text.trim().to_lowercase();
    let hit = |text: &str| needle.is_empty() || text.to_lowercase().contains(&needle);

    let projects = data
        .projects
        .iter()
        .filter(|p| hit(pick_localized(Some(p.name_th.as_str()), Some(p.name_en.as_str()), None, lang).unwrap_or_default()))
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect();

    let locations = data
        .locations
        .iter()
        .filter(|l| {
            let text = if lang.prefers_english() {
                l.text_en.as_deref().filter(|t| !t.is_empty()).unwrap_or(l.text.as_str())
            } else {
                l.text.as_str()
            };
            hit(text)
        })
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect();

    SuggestionsData { projects, locations }
}
