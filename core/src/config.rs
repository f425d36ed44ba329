//! Client configuration and its persistence.
//!
//! `ClientConfig` is passed explicitly into every `PostsClient` operation.
//! `ConfigStore` persists the base URL between sessions; neither
//! implementation surfaces errors, a broken store reads as empty.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Key under which the base URL is persisted.
pub const BASE_URL_KEY: &str = "apiBaseUrl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Persists and retrieves the API base URL.
pub trait ConfigStore: Send + Sync {
    /// The previously saved base URL, if any.
    fn get(&self) -> Option<String>;

    /// Overwrite the saved base URL. The value is not validated.
    fn set(&self, value: &str);
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    value: Mutex<Option<String>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self) -> Option<String> {
        self.value.lock().clone()
    }

    fn set(&self, value: &str) {
        *self.value.lock() = Some(value.to_string());
    }
}

/// JSON file store: `{"apiBaseUrl": "..."}`. Unrelated keys in the file are
/// left alone on write.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Option<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "failed to read config file");
                return None;
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => {
                warn!(path = ?self.path, "config file is not a JSON object");
                None
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "failed to parse config file");
                None
            }
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, content)
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self) -> Option<String> {
        let document = self.read_document()?;
        match document.get(BASE_URL_KEY) {
            Some(Value::String(url)) => Some(url.clone()),
            _ => None,
        }
    }

    fn set(&self, value: &str) {
        let mut document = self.read_document().unwrap_or_default();
        document.insert(BASE_URL_KEY.to_string(), Value::String(value.to_string()));
        match self.write_document(&document) {
            Ok(()) => debug!(path = ?self.path, "base url saved"),
            Err(e) => warn!(path = ?self.path, error = %e, "failed to save config file"),
        }
    }
}
