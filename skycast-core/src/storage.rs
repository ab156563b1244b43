use anyhow::{Context, Result};
use std::{collections::HashMap, fs, path::PathBuf};

/// Session-scoped key-value store backing the history blob. Mirrors the
/// narrow get/set/remove surface of browser session storage.
pub trait SessionStorage: Send + std::fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage. Lives only as long as the process; handy for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One file per key under a directory. A missing file reads as `None`,
/// so a fresh session starts empty without special-casing.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read storage file: {}", path.display()))?;

        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create storage directory: {}", parent.display())
            })?;
        }

        fs::write(&path, value)
            .with_context(|| format!("Failed to write storage file: {}", path.display()))?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove storage file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("v".to_string()));

        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn file_storage_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        assert_eq!(storage.get("histories").unwrap(), None);

        storage.set("histories", "[1,2,3]").unwrap();
        assert_eq!(
            storage.get("histories").unwrap(),
            Some("[1,2,3]".to_string())
        );

        storage.remove("histories").unwrap();
        assert_eq!(storage.get("histories").unwrap(), None);
    }

    #[test]
    fn file_storage_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut storage = FileStorage::new(&nested);

        storage.set("histories", "[]").unwrap();
        assert_eq!(storage.get("histories").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn remove_of_missing_key_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        assert!(storage.remove("nope").is_ok());
    }
}
