//! Snapshot load/save that never fails the caller.

use serde::{de::DeserializeOwned, Serialize};
use shop_cache::{Cache, KvBackend};

/// Read a snapshot, falling back to the default when it is missing or
/// unreadable.
pub(crate) fn load<B: KvBackend, T: DeserializeOwned + Default>(cache: &Cache<B>, key: &str) -> T {
    match cache.get::<T>(key) {
        Ok(Some(value)) => {
            tracing::debug!(key, "rehydrated snapshot");
            value
        }
        Ok(None) => T::default(),
        Err(error) => {
            tracing::warn!(key, %error, "discarding unreadable snapshot");
            T::default()
        }
    }
}

/// Write a snapshot. Failures are logged; the in-memory state stays
/// authoritative.
pub(crate) fn save<B: KvBackend, T: Serialize>(cache: &Cache<B>, key: &str, value: &T) -> bool {
    match cache.set(key, value) {
        Ok(()) => true,
        Err(error) => {
            tracing::error!(key, %error, "failed to persist snapshot");
            false
        }
    }
}

/// Delete a snapshot, logging failures.
pub(crate) fn remove<B: KvBackend>(cache: &Cache<B>, key: &str) {
    if let Err(error) = cache.delete(key) {
        tracing::error!(key, %error, "failed to delete snapshot");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_cache::MemoryBackend;

    #[test]
    fn test_load_falls_back_on_garbage() {
        let backend = MemoryBackend::new();
        backend.insert_raw("k", "not json").unwrap();
        let cache = Cache::new(backend);
        let value: Vec<u32> = load(&cache, "k");
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_reports_failure() {
        let backend = MemoryBackend::new();
        let cache = Cache::new(backend.clone());
        assert!(save(&cache, "k", &vec![1, 2]));
        assert_eq!(load::<_, Vec<u32>>(&cache, "k"), vec![1, 2]);

        backend.set_disabled(true);
        assert!(!save(&cache, "k", &vec![3]));
    }
}
