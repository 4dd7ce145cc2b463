//! Persistence: key-value stores, the documents kept in them, and the TOML
//! configuration file.

mod config;
pub mod database;
mod debounce;
mod settings;
pub mod snapshot;

pub use config::{Config, LifecycleConfig, PersistenceConfig, TimerConfig};
pub use database::Database;
pub use debounce::DebouncedWriter;
pub use settings::Settings;
pub use snapshot::{AnchoredTimer, TimerSnapshot};

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ConfigError, CoreError, StorageError};

/// Returns the data directory, creating it if needed.
///
/// `YEOLGONG_DATA_DIR` wins when set. Otherwise `~/.config/yeolgong`, or
/// `~/.config/yeolgong-dev` when `YEOLGONG_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let dir = match std::env::var_os("YEOLGONG_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("YEOLGONG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("yeolgong-dev")
            } else {
                base_dir.join("yeolgong")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// A durable string-to-string store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process store. `set_failing(true)` makes every call fail, to exercise
/// the best-effort save path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            Err(StorageError::Unavailable("memory store set to fail".into()))
        } else {
            Ok(())
        }
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Document {
    Settings,
    Subjects,
    Sessions,
    TimerSnapshot,
    DDays,
    Todos,
}

impl Document {
    pub const ALL: [Document; 6] = [
        Document::Settings,
        Document::Subjects,
        Document::Sessions,
        Document::TimerSnapshot,
        Document::DDays,
        Document::Todos,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Document::Settings => "yeolgong/settings",
            Document::Subjects => "yeolgong/subjects",
            Document::Sessions => "yeolgong/sessions",
            Document::TimerSnapshot => "yeolgong/timer_snapshot",
            Document::DDays => "yeolgong/ddays",
            Document::Todos => "yeolgong/todos",
        }
    }
}

/// JSON documents over a [`KvStore`]. Reads fall back to defaults and writes
/// are best-effort: failures are logged, never raised.
#[derive(Debug)]
pub struct Gateway<S> {
    store: S,
}

impl<S: KvStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and decode a document. Missing, unreadable and malformed
    /// documents all come back as `None`.
    pub fn load<T: DeserializeOwned>(&self, doc: Document) -> Option<T> {
        let raw = match self.store.get(doc.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("failed to read {}: {e}", doc.key());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("ignoring malformed {}: {e}", doc.key());
                None
            }
        }
    }

    pub fn load_or_default<T: DeserializeOwned + Default>(&self, doc: Document) -> T {
        self.load(doc).unwrap_or_default()
    }

    /// Encode and write a document. Returns whether the write landed.
    pub fn save<T: Serialize + ?Sized>(&self, doc: Document, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to encode {}: {e}", doc.key());
                return false;
            }
        };
        match self.store.set(doc.key(), &raw) {
            Ok(()) => {
                debug!("saved {} ({} bytes)", doc.key(), raw.len());
                true
            }
            Err(e) => {
                warn!("failed to save {}: {e}", doc.key());
                false
            }
        }
    }
}

// ── Dot-path access over serde_json values ───────────────────────────

pub(crate) fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

/// Replace an existing leaf, parsing `value` after the type already there.
/// `null` clears optional fields.
pub(crate) fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if key.is_empty() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                _ if value == "null" => serde_json::Value::Null,
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                serde_json::Value::Null => serde_json::from_str(value)
                    .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                serde_json::Value::String(_) => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current.get_mut(part).ok_or_else(unknown)?;
    }

    Err(unknown())
}
