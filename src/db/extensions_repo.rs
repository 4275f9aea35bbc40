use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::{common::error::AppError, models::extension::PropertyExtension};

/// Read-only table of local extensions keyed by property id.
#[derive(Clone, Default)]
pub struct ExtensionRepository {
    extensions: Arc<HashMap<String, PropertyExtension>>,
}

impl ExtensionRepository {
    pub fn new(entries: Vec<PropertyExtension>) -> Self {
        let extensions = entries
            .into_iter()
            .filter(|e| !e.property_id.is_empty())
            .map(|e| (e.property_id.clone(), e))
            .collect();
        Self { extensions: Arc::new(extensions) }
    }

    /// Loads the JSON array at `path`. A missing file is an empty table;
    /// a broken one is logged and also treated as empty.
    pub async fn load(path: &Path) -> Self {
        match Self::read(path).await {
            Ok(Some(entries)) => {
                tracing::info!("Loaded {} property extensions from {}", entries.len(), path.display());
                Self::new(entries)
            }
            Ok(None) => {
                tracing::info!("No extensions file at {}, continuing without", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable extensions file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    async fn read(path: &Path) -> Result<Option<Vec<PropertyExtension>>, AppError> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn get(&self, property_id: &str) -> Option<&PropertyExtension> {
        self.extensions.get(property_id)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ExtensionRepository::load(&dir.path().join("nope.json")).await;
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn broken_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extensions.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(ExtensionRepository::load(&path).await.is_empty());
    }

    #[tokio::test]
    async fn loads_entries_by_property_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extensions.json");
        std::fs::write(
            &path,
            r#"[
                {"propertyId": "a", "isRecommended": true, "sortOrder": 2},
                {"propertyId": "b", "isHidden": true, "tags": ["pet-friendly"]},
                {"isRecommended": true}
            ]"#,
        )
        .unwrap();

        let repo = ExtensionRepository::load(&path).await;
        assert_eq!(repo.len(), 2);
        assert!(repo.get("a").unwrap().is_recommended);
        assert_eq!(repo.get("a").unwrap().sort_order, Some(2));
        assert!(repo.get("b").unwrap().is_hidden);
        assert_eq!(repo.get("b").unwrap().tags, vec!["pet-friendly".to_string()]);
        assert!(repo.get("c").is_none());
    }
}
