// src/services/cache.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::common::error::AppError;
use crate::models::property::{PropertiesEnvelope, PropertyRecord, SuggestionsEnvelope};
use crate::services::nainahub::{FetchPropertiesParams, PropertySource};

struct Entry<T> {
    fetched_at: Instant,
    value: T,
}

impl<T: Clone> Entry<T> {
    fn fresh(&self, ttl: Duration) -> Option<T> {
        (self.fetched_at.elapsed() < ttl).then(|| self.value.clone())
    }
}

/// Read-through cache in front of another [`PropertySource`].
///
/// Entries simply expire; there is no invalidation. Failures are never
/// cached, so the next request goes upstream again.
pub struct CachedSource {
    inner: Arc<dyn PropertySource>,
    ttl: Duration,
    suggestions_ttl: Duration,
    properties: RwLock<HashMap<String, Entry<PropertiesEnvelope<PropertyRecord>>>>,
    suggestions: RwLock<Option<Entry<SuggestionsEnvelope>>>,
}

impl CachedSource {
    pub fn new(inner: Arc<dyn PropertySource>, ttl: Duration, suggestions_ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            suggestions_ttl,
            properties: RwLock::new(HashMap::new()),
            suggestions: RwLock::new(None),
        }
    }
}

#[async_trait]
impl PropertySource for CachedSource {
    async fn fetch_properties(
        &self,
        params: &FetchPropertiesParams,
    ) -> Result<PropertiesEnvelope<PropertyRecord>, AppError> {
        let key = params.cache_key();

        if let Some(hit) = self.properties.read().await.get(&key).and_then(|e| e.fresh(self.ttl)) {
            tracing::debug!("cache hit: properties [{}]", key);
            return Ok(hit);
        }

        let value = self.inner.fetch_properties(params).await?;

        let mut map = self.properties.write().await;
        map.retain(|_, e| e.fetched_at.elapsed() < self.ttl);
        map.insert(key, Entry { fetched_at: Instant::now(), value: value.clone() });

        Ok(value)
    }

    async fn fetch_suggestions(&self) -> Result<SuggestionsEnvelope, AppError> {
        if let Some(hit) = self.suggestions.read().await.as_ref().and_then(|e| e.fresh(self.suggestions_ttl)) {
            return Ok(hit);
        }

        let value = self.inner.fetch_suggestions().await?;
        *self.suggestions.write().await = Some(Entry { fetched_at: Instant::now(), value: value.clone() });
        Ok(value)
    }

    fn source_name(&self) -> &'static str {
        self.inner.source_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        property_calls: AtomicUsize,
        suggestion_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl PropertySource for CountingSource {
        async fn fetch_properties(
            &self,
            _params: &FetchPropertiesParams,
        ) -> Result<PropertiesEnvelope<PropertyRecord>, AppError> {
            self.property_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Upstream("503 Service Unavailable".into()));
            }
            Ok(PropertiesEnvelope {
                success: true,
                data: vec![PropertyRecord { id: "p1".into(), ..Default::default() }],
                pagination: None,
            })
        }

        async fn fetch_suggestions(&self) -> Result<SuggestionsEnvelope, AppError> {
            self.suggestion_calls.fetch_add(1, Ordering::SeqCst);
            Ok(SuggestionsEnvelope { success: true, ..Default::default() })
        }

        fn source_name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn second_call_within_ttl_is_served_from_cache() {
        let inner = Arc::new(CountingSource::default());
        let cache = CachedSource::new(inner.clone(), Duration::from_secs(60), Duration::from_secs(300));
        let params = FetchPropertiesParams::with_limit(1000);

        cache.fetch_properties(&params).await.unwrap();
        let again = cache.fetch_properties(&params).await.unwrap();
        assert_eq!(again.data[0].id, "p1");
        assert_eq!(inner.property_calls.load(Ordering::SeqCst), 1);

        // Different parameters are a different entry.
        cache.fetch_properties(&FetchPropertiesParams::with_limit(10)).await.unwrap();
        assert_eq!(inner.property_calls.load(Ordering::SeqCst), 2);

        cache.fetch_suggestions().await.unwrap();
        cache.fetch_suggestions().await.unwrap();
        assert_eq!(inner.suggestion_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entries_are_refetched() {
        let inner = Arc::new(CountingSource::default());
        let cache = CachedSource::new(inner.clone(), Duration::ZERO, Duration::ZERO);
        let params = FetchPropertiesParams::default();

        cache.fetch_properties(&params).await.unwrap();
        cache.fetch_properties(&params).await.unwrap();
        assert_eq!(inner.property_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let inner = Arc::new(CountingSource { fail: true, ..Default::default() });
        let cache = CachedSource::new(inner.clone(), Duration::from_secs(60), Duration::from_secs(60));
        let params = FetchPropertiesParams::default();

        assert!(cache.fetch_properties(&params).await.is_err());
        assert!(cache.fetch_properties(&params).await.is_err());
        assert_eq!(inner.property_calls.load(Ordering::SeqCst), 2);
    }
}
