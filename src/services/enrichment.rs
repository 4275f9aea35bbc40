// src/services/enrichment.rs

use crate::{
    db::ExtensionRepository,
    models::{extension::EnhancedProperty, property::PropertyRecord},
};

#[derive(Clone, Default)]
pub struct EnrichmentService {
    repo: ExtensionRepository,
}

impl EnrichmentService {
    pub fn new(repo: ExtensionRepository) -> Self {
        Self { repo }
    }

    /// Merges every record with its extension, dropping hidden ones unless asked not to.
    pub fn enhance(&self, records: Vec<PropertyRecord>, include_hidden: bool) -> Vec<EnhancedProperty> {
        records
            .into_iter()
            .map(|p| {
                let ext = self.repo.get(&p.id);
                EnhancedProperty::merge(p, ext)
            })
            .filter(|p| include_hidden || !p.is_hidden)
            .collect()
    }

    /// Visible recommended records still on the market, by `sortOrder` then
    /// upstream order.
    pub fn recommended(&self, records: Vec<PropertyRecord>) -> Vec<EnhancedProperty> {
        let mut picked: Vec<EnhancedProperty> = self
            .enhance(records, false)
            .into_iter()
            .filter(|p| p.is_recommended && !p.property.status.is_closed())
            .collect();

        // Stable sort keeps upstream order among equal keys; unordered entries go last.
        picked.sort_by_key(|p| p.sort_order.unwrap_or(i32::MAX));
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{extension::PropertyExtension, property::PropertyStatus};

    fn record(id: &str) -> PropertyRecord {
        PropertyRecord { id: id.into(), ..Default::default() }
    }

    fn ext(id: &str, recommended: bool, hidden: bool, sort: Option<i32>) -> PropertyExtension {
        PropertyExtension {
            property_id: id.into(),
            is_recommended: recommended,
            is_hidden: hidden,
            tags: vec![],
            sort_order: sort,
        }
    }

    fn service() -> EnrichmentService {
        EnrichmentService::new(ExtensionRepository::new(vec![
            ext("a", true, false, Some(5)),
            ext("b", false, true, None),
            ext("c", true, false, None),
            ext("d", true, false, Some(1)),
            ext("e", true, true, Some(0)),
        ]))
    }

    #[test]
    fn hidden_records_need_opt_in() {
        let records = vec![record("a"), record("b"), record("x")];

        let visible = service().enhance(records.clone(), false);
        let ids: Vec<&str> = visible.iter().map(|p| p.property.id.as_str()).collect();
        assert_eq!(ids, ["a", "x"]);

        let all = service().enhance(records, true);
        assert_eq!(all.len(), 3);
        assert!(all[1].is_hidden);
        assert!(!all[2].is_recommended);
    }

    #[test]
    fn recommended_sorted_by_sort_order_then_upstream_order() {
        let records = ["a", "b", "c", "d", "e", "x"].map(record).to_vec();
        let picked = service().recommended(records);
        let ids: Vec<&str> = picked.iter().map(|p| p.property.id.as_str()).collect();
        assert_eq!(ids, ["d", "a", "c"]);
    }

    #[test]
    fn closed_deals_are_never_recommended() {
        let mut sold = record("d");
        sold.status = PropertyStatus::Sold;
        let mut rented = record("a");
        rented.status = PropertyStatus::Rented;

        let picked = service().recommended(vec![rented, record("c"), sold]);
        let ids: Vec<&str> = picked.iter().map(|p| p.property.id.as_str()).collect();
        assert_eq!(ids, ["c"]);
    }
}
