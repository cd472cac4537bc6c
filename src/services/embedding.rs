use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while producing an embedding
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmbeddingError {
    #[error("Unknown embedding model: {0}")]
    UnknownModel(String),
}

/// Result of an embedding lookup
#[derive(Debug, Clone)]
pub struct Embedding {
    pub vector: Arc<Vec<f32>>,
    pub cached: bool,
    /// Hex SHA-256 digest identifying the (model, text) pair
    pub key: String,
}

/// Embedding cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingStats {
    pub entries: u64,
    pub models: Vec<String>,
}

/// Memoizes deterministic embedding vectors per (text, model)
///
/// Unbounded unless a capacity or TTL is configured. Concurrent requests for
/// the same missing key are coalesced by the underlying cache, and since the
/// vector is a pure function of the key every caller sees the same value.
pub struct EmbeddingCache {
    entries: Cache<String, Arc<Vec<f32>>>,
    dimensions: BTreeMap<String, usize>,
}

impl EmbeddingCache {
    /// Create a cache for the given models
    ///
    /// # Arguments
    /// * `dimensions` - Vector length for each supported model id
    /// * `max_entries` - Optional capacity bound
    /// * `ttl` - Optional time to live per entry
    pub fn new(dimensions: BTreeMap<String, usize>, max_entries: Option<u64>, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder();
        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            entries: builder.build(),
            dimensions,
        }
    }

    /// Unbounded cache with the default model set
    pub fn with_default_models() -> Self {
        Self::new(default_model_dimensions(), None, None)
    }

    /// Return the cached vector for `(text, model_id)`, computing it on first use
    pub fn get_or_compute(&self, text: &str, model_id: &str) -> Result<Embedding, EmbeddingError> {
        let dimension = self
            .dimensions
            .get(model_id)
            .copied()
            .ok_or_else(|| EmbeddingError::UnknownModel(model_id.to_string()))?;

        let key = cache_key(text, model_id);
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Arc::new(hash_embed(&key, dimension)));

        let cached = !entry.is_fresh();
        if cached {
            tracing::trace!("Embedding cache hit: {}", key);
        } else {
            tracing::trace!("Embedding cache miss: {}", key);
        }

        Ok(Embedding {
            vector: entry.into_value(),
            cached,
            key,
        })
    }

    /// Supported model ids
    pub fn models(&self) -> Vec<String> {
        self.dimensions.keys().cloned().collect()
    }

    /// Get cache statistics
    pub fn stats(&self) -> EmbeddingStats {
        // entry_count lags behind inserts until pending maintenance runs
        self.entries.run_pending_tasks();
        EmbeddingStats {
            entries: self.entries.entry_count(),
            models: self.models(),
        }
    }
}

impl Default for EmbeddingCache {
    fn default() -> Self {
        Self::with_default_models()
    }
}

/// Model ids served out of the box and their vector lengths
pub fn default_model_dimensions() -> BTreeMap<String, usize> {
    BTreeMap::from([
        ("text".to_string(), 384),
        ("vision".to_string(), 512),
        ("multimodal".to_string(), 768),
    ])
}

/// Hex SHA-256 over the model id and the text, separated by a NUL byte
pub fn cache_key(text: &str, model_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(model_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Deterministic vector in [-1, 1] expanded from the key with a block counter
fn hash_embed(key: &str, dimension: usize) -> Vec<f32> {
    let mut vector = Vec::with_capacity(dimension);
    let mut block: u32 = 0;

    while vector.len() < dimension {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        hasher.update(block.to_le_bytes());
        let digest = hasher.finalize();

        for byte in digest.iter().take(dimension - vector.len()) {
            vector.push((*byte as f32 / 255.0) * 2.0 - 1.0);
        }
        block += 1;
    }

    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_misses_then_hits() {
        let cache = EmbeddingCache::with_default_models();

        let first = cache.get_or_compute("dry eyes after work", "text").unwrap();
        let second = cache.get_or_compute("dry eyes after work", "text").unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.vector, second.vector);
        assert_eq!(first.key, second.key);
    }

    #[test]
    fn test_stats_count_fresh_entries() {
        let cache = EmbeddingCache::with_default_models();
        cache.get_or_compute("a", "text").unwrap();
        cache.get_or_compute("b", "text").unwrap();
        cache.get_or_compute("a", "text").unwrap();

        assert_eq!(cache.stats().entries, 2);
    }

    #[test]
    fn test_dimension_per_model() {
        let cache = EmbeddingCache::with_default_models();
        assert_eq!(cache.get_or_compute("a", "text").unwrap().vector.len(), 384);
        assert_eq!(cache.get_or_compute("a", "vision").unwrap().vector.len(), 512);
        assert_eq!(cache.get_or_compute("a", "multimodal").unwrap().vector.len(), 768);
    }

    #[test]
    fn test_model_is_part_of_key() {
        assert_ne!(cache_key("a", "text"), cache_key("a", "vision"));
        assert_ne!(cache_key("ab", "text"), cache_key("b", "texta"));
        assert_eq!(cache_key("a", "text").len(), 64);
    }

    #[test]
    fn test_values_in_unit_range() {
        let vector = hash_embed(&cache_key("blurred vision", "text"), 384);
        assert!(vector.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_deterministic_across_caches() {
        let a = EmbeddingCache::with_default_models();
        let b = EmbeddingCache::with_default_models();
        assert_eq!(
            a.get_or_compute("same text", "text").unwrap().vector,
            b.get_or_compute("same text", "text").unwrap().vector
        );
    }

    #[test]
    fn test_unknown_model() {
        let cache = EmbeddingCache::with_default_models();
        assert_eq!(
            cache.get_or_compute("a", "audio").unwrap_err(),
            EmbeddingError::UnknownModel("audio".to_string())
        );
    }
}
