// src/services/favorites.rs

use crate::{common::error::AppError, db::KeyValueStorage};

pub const FAVORITES_KEY: &str = "property-favorites";

/// Bookmarked property ids, deduplicated, in the order they were added.
///
/// Starts out unloaded. Until [`FavoritesStore::load`] runs, changes stay in
/// memory and are replaced by whatever was persisted. Once loaded, every
/// change writes the whole set back as a JSON array of strings.
pub struct FavoritesStore<S: KeyValueStorage> {
    storage: S,
    ids: Vec<String>,
    loaded: bool,
}

impl<S: KeyValueStorage> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage, ids: Vec::new(), loaded: false }
    }

    /// Reads the persisted set. Anything unreadable counts as no favorites.
    pub fn load(&mut self) -> Result<(), AppError> {
        let raw = match self.storage.get(FAVORITES_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Unreadable favorites data, starting empty: {}", e);
                None
            }
        };

        let stored: Vec<String> = match raw.as_deref().map(serde_json::from_str) {
            Some(Ok(ids)) => ids,
            Some(Err(e)) => {
                tracing::warn!("Discarding corrupt favorites data: {}", e);
                Vec::new()
            }
            None => Vec::new(),
        };

        self.ids.clear();
        for id in stored {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        self.loaded = true;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> Result<bool, AppError> {
        if self.is_favorite(id) {
            self.remove(id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    pub fn add(&mut self, id: &str) -> Result<(), AppError> {
        if self.is_favorite(id) {
            return Ok(());
        }
        let mut next = self.ids.clone();
        next.push(id.to_string());
        self.commit(next)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), AppError> {
        if !self.is_favorite(id) {
            return Ok(());
        }
        let next = self.ids.iter().filter(|f| *f != id).cloned().collect();
        self.commit(next)
    }

    pub fn clear_all(&mut self) -> Result<(), AppError> {
        self.commit(Vec::new())
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn favorites(&self) -> &[String] {
        &self.ids
    }

    // Memory only changes once the write went through.
    fn commit(&mut self, next: Vec<String>) -> Result<(), AppError> {
        if self.loaded {
            let raw = serde_json::to_string(&next)?;
            self.storage.set(FAVORITES_KEY, &raw)?;
        }
        self.ids = next;
        Ok(())
    }
}
