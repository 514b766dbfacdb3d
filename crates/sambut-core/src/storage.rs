//! Persistent key-value storage for the saved display name and the
//! submission history.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     PersistentStore                           │
//! │   - Typed access to the `userName` and `messageHistory` keys  │
//! │   - JSON encoding of the history record                       │
//! │   - Read failures degrade to "absent"                         │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     KeyValueStore                             │
//! │   - MemoryStore: in-memory (testing, native hosts)            │
//! │   - LocalStorageStore (sambut-web): window.localStorage       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Unavailable` | Storage disabled or missing | Reads return absent, writes return error |
//! | `StorageError::Backend` | Quota exceeded, host exception | Reads return absent, writes return error |
//! | `StorageError::Serialization` | `messageHistory` is not a JSON array | History loads empty, logged |
//! | Malformed history entry | Entry missing a field or of the wrong type | Entry skipped, logged; the rest load |
//! | Missing entry | First visit | Empty history / no saved name |
//!
//! Read-then-write of the history is not transactional. The page runs on a
//! single-threaded event loop so two submissions never interleave; a backend
//! shared between concurrent writers would need its own coordination.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::config::StorageKeys;
use crate::submission::{ContactSubmission, SubmissionHistory};

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Backend is not available (storage disabled, no window).
    Unavailable(String),
    /// The backend rejected the operation (quota, host exception).
    Backend(String),
    /// A stored record could not be encoded or decoded.
    Serialization(serde_json::Error),
    /// In-process state could not be accessed.
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            StorageError::Backend(msg) => write!(f, "storage backend error: {msg}"),
            StorageError::Serialization(e) => write!(f, "serialization error: {e}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Serialization(e) => Some(e),
            StorageError::Unavailable(_)
            | StorageError::Backend(_)
            | StorageError::Corruption(_) => None,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ─────────────────────────────────────────────────────────────────────────────
// Key-Value Backend Trait
// ─────────────────────────────────────────────────────────────────────────────

/// String-to-string storage scoped to one origin, surviving page reloads.
///
/// Not `Send`: browser storage handles are bound to the page's thread.
pub trait KeyValueStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read a value. `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Store (always available)
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory backend.
///
/// Clones share the same entries, so a clone handed to a second [`Page`]
/// behaves like the same origin after a reload.
///
/// [`Page`]: crate::Page
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory store pre-populated with entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().map(|g| g.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed adapter
// ─────────────────────────────────────────────────────────────────────────────

/// Sole owner of the two persisted records.
#[derive(Debug)]
pub struct PersistentStore<S> {
    backend: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> PersistentStore<S> {
    #[must_use]
    pub fn new(backend: S, keys: StorageKeys) -> Self {
        Self { backend, keys }
    }

    /// The saved display name, if one exists and is non-empty.
    #[must_use]
    pub fn load_user_name(&self) -> Option<String> {
        match self.backend.get_item(&self.keys.user_name) {
            Ok(Some(name)) if !name.is_empty() => Some(name),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    key = %self.keys.user_name,
                    error = %err,
                    "saved name unreadable, treating as absent"
                );
                None
            }
        }
    }

    pub fn save_user_name(&self, name: &str) -> StorageResult<()> {
        self.backend.set_item(&self.keys.user_name, name)
    }

    /// The persisted history, or an empty one when absent or unreadable.
    #[must_use]
    pub fn load_history(&self) -> SubmissionHistory {
        match self.try_load_history() {
            Ok(history) => history,
            Err(err) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    key = %self.keys.history,
                    error = %err,
                    "submission history unreadable, starting empty"
                );
                SubmissionHistory::new()
            }
        }
    }

    /// Decode the history record entry by entry.
    ///
    /// Malformed entries are skipped and the rest kept. A record that is not
    /// an array at all is an error.
    fn try_load_history(&self) -> StorageResult<SubmissionHistory> {
        let Some(raw) = self.backend.get_item(&self.keys.history)? else {
            return Ok(SubmissionHistory::new());
        };
        // A literal `null` record decodes as an empty history.
        let Some(values): Option<Vec<serde_json::Value>> = serde_json::from_str(&raw)? else {
            return Ok(SubmissionHistory::new());
        };

        let mut entries = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<ContactSubmission>(value) {
                Ok(entry) => entries.push(entry),
                Err(err) => tracing::warn!(
                    backend = self.backend.name(),
                    key = %self.keys.history,
                    index,
                    error = %err,
                    "skipping malformed history entry"
                ),
            }
        }
        Ok(SubmissionHistory::from_newest_first(entries))
    }

    /// Replace the persisted history with `history`.
    pub fn save_history(&self, history: &SubmissionHistory) -> StorageResult<()> {
        let raw = serde_json::to_string(history)?;
        self.backend.set_item(&self.keys.history, &raw)
    }

    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(backend: MemoryStore) -> PersistentStore<MemoryStore> {
        PersistentStore::new(backend, StorageKeys::default())
    }

    fn submission(name: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: "dewi@example.com".to_string(),
            phone: "081234567890".to_string(),
            message: "Terima kasih banyak".to_string(),
            timestamp: "2/3/2026, 10.11.12".to_string(),
        }
    }

    /// Backend whose every call fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn name(&self) -> &str {
            "BrokenStore"
        }

        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disabled".into()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Backend("quota exceeded".into()))
        }
    }

    #[test]
    fn memory_store_basic_operations() {
        let backend = MemoryStore::new();
        assert!(backend.get_item("k").unwrap().is_none());

        backend.set_item("k", "v").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(backend.len(), 1);

        backend.set_item("k", "w").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("w"));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set_item("userName", "Rina").unwrap();
        assert_eq!(b.get_item("userName").unwrap().as_deref(), Some("Rina"));
    }

    #[test]
    fn user_name_round_trip() {
        let s = store(MemoryStore::new());
        assert_eq!(s.load_user_name(), None);
        s.save_user_name("Rina").unwrap();
        assert_eq!(s.load_user_name().as_deref(), Some("Rina"));
        assert_eq!(
            s.backend().get_item("userName").unwrap().as_deref(),
            Some("Rina")
        );
    }

    #[test]
    fn empty_user_name_counts_as_absent() {
        let s = store(MemoryStore::with_entries([("userName", "")]));
        assert_eq!(s.load_user_name(), None);
    }

    #[test]
    fn history_round_trip_under_message_history_key() {
        let s = store(MemoryStore::new());
        let mut history = SubmissionHistory::new();
        history.prepend(submission("Ani"));
        history.prepend(submission("Budi"));
        s.save_history(&history).unwrap();

        let raw = s.backend().get_item("messageHistory").unwrap().unwrap();
        assert!(raw.starts_with("[{\"name\":\"Budi\""));
        assert_eq!(s.load_history(), history);
    }

    #[test]
    fn reads_history_written_by_the_legacy_page() {
        let raw = r#"[{"name":"Ani","email":"ani@example.com","phone":"081234567890","message":"Halo semuanya","timestamp":"5/6/2025, 07.08.09"}]"#;
        let s = store(MemoryStore::with_entries([("messageHistory", raw)]));
        let history = s.load_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().timestamp, "5/6/2025, 07.08.09");
    }

    #[test]
    fn corrupt_or_null_history_loads_empty() {
        for raw in ["{not json", "null", "{\"name\":\"x\"}", "[1,2,3]", "[]"] {
            let s = store(MemoryStore::with_entries([("messageHistory", raw)]));
            assert!(s.load_history().is_empty(), "{raw}");
        }
    }

    #[test]
    fn malformed_entries_are_skipped_and_the_rest_kept() {
        let raw = r#"[
            {"name":"Ani","email":"ani@example.com","phone":"081234567890","message":"Halo semuanya","timestamp":"1/1/2026, 08.00.00"},
            {"name":"Budi","email":"budi@example.com","message":"Tanpa telepon","timestamp":"2/1/2026, 08.00.00"},
            "bukan rekaman",
            {"name":"Citra","email":"citra@example.com","phone":"081298765432","message":"Sampai jumpa","timestamp":"3/1/2026, 08.00.00"}
        ]"#;
        let s = store(MemoryStore::with_entries([("messageHistory", raw)]));
        let names: Vec<_> = s.load_history().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, ["Ani", "Citra"]);
    }

    #[test]
    fn unavailable_backend_degrades_reads_and_reports_writes() {
        let s = PersistentStore::new(BrokenStore, StorageKeys::default());
        assert_eq!(s.load_user_name(), None);
        assert!(s.load_history().is_empty());
        assert!(matches!(
            s.save_user_name("Rina"),
            Err(StorageError::Backend(_))
        ));
        assert!(matches!(
            s.save_history(&SubmissionHistory::new()),
            Err(StorageError::Backend(_))
        ));
    }

    #[test]
    fn custom_keys_are_honored() {
        let keys = StorageKeys {
            user_name: "sambut.name".to_string(),
            history: "sambut.history".to_string(),
        };
        let s = PersistentStore::new(MemoryStore::new(), keys);
        s.save_user_name("Rina").unwrap();
        assert!(s.backend().get_item("userName").unwrap().is_none());
        assert_eq!(
            s.backend().get_item("sambut.name").unwrap().as_deref(),
            Some("Rina")
        );
    }

    #[test]
    fn error_display_and_source() {
        let err = StorageError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(err.to_string().starts_with("serialization error"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&StorageError::Backend("q".into())).is_none());
    }
}
