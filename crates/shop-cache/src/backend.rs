//! Storage backends for the key-value cache.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::CacheError;

/// Raw byte storage underneath [`Cache`](crate::Cache).
///
/// Backends are last-write-wins: there is no versioning, so two writers
/// sharing a backend silently overwrite each other.
pub trait KvBackend {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all keys currently stored.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-memory backend.
///
/// Clones share the same storage, so several stores can be opened over
/// one backend the way browser tabs share local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    quota_bytes: Option<usize>,
    disabled: Arc<AtomicBool>,
}

impl MemoryBackend {
    /// Create an empty, unbounded backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that refuses writes once the total stored size
    /// would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota_bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Disable or re-enable the backend. A disabled backend fails every
    /// operation with [`CacheError::Disabled`].
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Store raw bytes, bypassing serialization. Useful for seeding
    /// corrupt data.
    pub fn insert_raw(&self, key: &str, value: impl Into<Vec<u8>>) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value.into());
        Ok(())
    }

    fn check_enabled(&self) -> Result<(), CacheError> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(CacheError::Disabled);
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, CacheError> {
        self.entries
            .lock()
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.check_enabled()?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.check_enabled()?;
        let mut entries = self.lock()?;

        if let Some(quota) = self.quota_bytes {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(used);
            if needed > available {
                return Err(CacheError::QuotaExceeded { needed, available });
            }
        }

        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.check_enabled()?;
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.check_enabled()?;
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Directory backend: one JSON file per key.
///
/// Writes go to a temporary file that is then renamed over the target, so
/// a crash mid-write never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

const FILE_EXTENSION: &str = "json";

impl FileBackend {
    /// Open (and create if needed) a directory-backed store.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            CacheError::OpenError(format!("{}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    /// The directory holding the store's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("empty key".to_string()));
        }
        Ok(self
            .dir
            .join(format!("{}.{}", encode_key(key), FILE_EXTENSION)))
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |e| e == FILE_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if let Some(key) = decode_key(stem) {
                        keys.push(key);
                    }
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Escape a key into a portable file name. Alphanumerics, `-` and `_` pass
/// through, every other byte becomes `%XX`.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let backend = MemoryBackend::new();
        backend.set("a", b"1").unwrap();
        assert_eq!(backend.get("a").unwrap(), Some(b"1".to_vec()));
        assert!(backend.exists("a").unwrap());

        backend.delete("a").unwrap();
        assert_eq!(backend.get("a").unwrap(), None);
    }

    #[test]
    fn test_memory_clones_share_state() {
        let first = MemoryBackend::new();
        let second = first.clone();
        first.set("shared", b"x").unwrap();
        assert_eq!(second.get("shared").unwrap(), Some(b"x".to_vec()));
    }

    #[test]
    fn test_memory_quota() {
        let backend = MemoryBackend::with_quota(10);
        backend.set("k", b"12345").unwrap();

        let err = backend.set("other", b"123456").unwrap_err();
        assert!(matches!(err, CacheError::QuotaExceeded { .. }));

        // Overwriting an existing key only counts the new value.
        backend.set("k", b"123456789").unwrap();
    }

    #[test]
    fn test_memory_disabled() {
        let backend = MemoryBackend::new();
        backend.set_disabled(true);
        assert!(matches!(backend.get("k"), Err(CacheError::Disabled)));
        assert!(matches!(backend.set("k", b"v"), Err(CacheError::Disabled)));

        backend.set_disabled(false);
        assert!(backend.set("k", b"v").is_ok());
    }

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path().join("store")).unwrap();

        backend.set("storefront:cart", b"{}").unwrap();
        assert_eq!(backend.get("storefront:cart").unwrap(), Some(b"{}".to_vec()));
        assert_eq!(backend.keys().unwrap(), vec!["storefront:cart".to_string()]);

        backend.delete("storefront:cart").unwrap();
        assert_eq!(backend.get("storefront:cart").unwrap(), None);
        // Deleting again is fine.
        backend.delete("storefront:cart").unwrap();
    }

    #[test]
    fn test_file_backend_rejects_empty_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert!(matches!(backend.get(""), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_key_encoding() {
        assert_eq!(encode_key("storefront:cart"), "storefront%3Acart");
        assert_eq!(decode_key("storefront%3Acart").as_deref(), Some("storefront:cart"));
        assert_eq!(decode_key("bad%zz"), None);
    }
}
