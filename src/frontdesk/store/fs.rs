use super::Storage;
use crate::error::{FrontdeskError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each key as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FrontdeskError::Io)?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(FrontdeskError::Io)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "read key");
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.key_path(key);
        // Readers only ever see a complete file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(FrontdeskError::Io)?;
        fs::rename(&tmp, &path).map_err(FrontdeskError::Io)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(FrontdeskError::Io)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        assert_eq!(storage.get("doctors").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("data");
        let mut storage = FileStorage::new(&root);

        storage.set("doctors", "[]").unwrap();

        assert!(root.join("doctors.json").exists());
        assert!(!root.join("doctors.json.tmp").exists());
        assert_eq!(storage.get("doctors").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path());
        storage.set("k", "v").unwrap();

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();

        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn write_into_a_file_path_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a dir").unwrap();
        let mut storage = FileStorage::new(&blocker);

        assert!(storage.set("doctors", "[]").is_err());
    }
}
