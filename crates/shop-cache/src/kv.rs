//! Key-Value store wrapper with automatic serialization.

use crate::backend::KvBackend;
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<B> {
    backend: B,
}

impl<B: KvBackend> Cache<B> {
    /// Wrap a backend.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shop_cache::{Cache, MemoryBackend};
    ///
    /// let cache = Cache::new(MemoryBackend::new());
    /// cache.set("greeting", &"hello").unwrap();
    /// let value: Option<String> = cache.get("greeting").unwrap();
    /// assert_eq!(value.as_deref(), Some("hello"));
    /// ```
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. Stored bytes that do not
    /// decode as `T` are a [`CacheError::SerializeError`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)?;
        tracing::trace!(key, bytes = bytes.len(), "cache write");
        Ok(())
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = shop_cache::cache_key!("storefront", "cart");
/// assert_eq!(key, "storefront:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        items: Vec<u32>,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::new(MemoryBackend::new());
        let snapshot = Snapshot { items: vec![1, 2, 3] };

        cache.set("snap", &snapshot).unwrap();
        assert_eq!(cache.get::<Snapshot>("snap").unwrap(), Some(snapshot));
        assert!(cache.exists("snap").unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["snap".to_string()]);
    }

    #[test]
    fn test_missing_key() {
        let cache = Cache::new(MemoryBackend::new());
        assert_eq!(cache.get::<Snapshot>("nope").unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let backend = MemoryBackend::new();
        backend.insert_raw("snap", "{not json").unwrap();
        let cache = Cache::new(backend);

        let err = cache.get::<Snapshot>("snap").unwrap_err();
        assert!(matches!(err, CacheError::SerializeError(_)));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("storefront", "wishlist"), "storefront:wishlist");
        assert_eq!(cache_key!("a", 1, "b"), "a:1:b");
    }
}
