//! Key-value persistence for session state

use crate::{ReceiptError, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// String key-value storage surviving between sessions
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// A missing or empty file reads as an empty store. Writes go to a sibling
/// temporary file that then replaces the original.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let text = std::fs::read_to_string(&self.path).map_err(|e| self.error("read", e))?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&text).map_err(|e| self.error("parse", e))? {
            Value::Object(map) => Ok(map),
            _ => Err(ReceiptError::StoreError(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.error("create directory for", e))?;
        }

        let text = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(|e| self.error("write", e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.error("replace", e))?;
        Ok(())
    }

    fn error(&self, action: &str, err: impl std::fmt::Display) -> ReceiptError {
        ReceiptError::StoreError(format!("Failed to {action} {}: {err}", self.path.display()))
    }
}

/// Convert a JSON value to its stored string form
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).and_then(value_to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), Value::String(value.to_string()));
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get("receiptNumber").unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = FileStore::new(&path);
        store.set("receiptNumber", "4").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("receiptNumber").unwrap().as_deref(), Some("4"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("state.json");

        let mut store = FileStore::new(&path);
        store.set("receiptNumber", "2").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_store_numeric_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"receiptNumber": 12}"#).unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("receiptNumber").unwrap().as_deref(), Some("12"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("receiptNumber"),
            Err(ReceiptError::StoreError(_))
        ));

        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            store.get("receiptNumber"),
            Err(ReceiptError::StoreError(_))
        ));
    }
}
