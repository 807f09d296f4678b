//! JSON file storage backend.
//!
//! All keys live in one JSON object. Every read goes to disk so that a value
//! written by another process (another CLI invocation) is picked up; every
//! mutation rewrites the file through a temp file + rename, so a crash never
//! leaves half a document behind and a batch lands in one step.

use crate::{KeyValueStorage, StorageError, StorageResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

type Document = BTreeMap<String, String>;

/// Storage persisted as a JSON object file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open storage at `path`. The file (and its parent directories) is
    /// created lazily on the first write; an existing file must be a JSON
    /// object of strings.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let storage = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };
        // Fail early on a corrupt document instead of at the first request.
        storage.read_document()?;
        Ok(storage)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> StorageResult<Document> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Document::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                StorageError::Encoding(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, document: &Document) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_vec_pretty(document)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&tmp_path)?;
        file.write_all(&content)?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&tmp_path, &self.path)?;
        tracing::trace!(path = %self.path.display(), keys = document.len(), "storage file written");
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> StorageResult<bool>
    where
        F: FnOnce(&mut Document) -> bool,
    {
        let _guard = self.lock.lock();
        let mut document = self.read_document()?;
        let changed = mutate(&mut document);
        if changed {
            self.write_document(&document)?;
        }
        Ok(changed)
    }
}

impl KeyValueStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.set_many(&[(key, value)])
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_document()?.remove(key))
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        self.update(|document| document.remove(key).is_some())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> StorageResult<()> {
        self.update(|document| {
            for (key, value) in entries {
                document.insert(key.to_string(), value.to_string());
            }
            true
        })?;
        Ok(())
    }

    fn delete_many(&self, keys: &[&str]) -> StorageResult<()> {
        self.update(|document| {
            let mut changed = false;
            for key in keys {
                changed |= document.remove(*key).is_some();
            }
            changed
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("credentials.json")).unwrap();

        assert_eq!(storage.get("access_token").unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("access_token", "abc").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("access_token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_writes_from_another_handle_are_visible() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let first = FileStorage::open(&path).unwrap();
        let second = FileStorage::open(&path).unwrap();

        first.set("refresh_token", "r1").unwrap();
        assert_eq!(second.get("refresh_token").unwrap().as_deref(), Some("r1"));
    }

    #[test]
    fn test_batches_and_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("credentials.json")).unwrap();

        storage
            .set_many(&[("access_token", "a"), ("refresh_token", "r")])
            .unwrap();
        assert!(storage.has("access_token").unwrap());
        assert!(storage.has("refresh_token").unwrap());

        assert!(storage.delete("access_token").unwrap());
        assert!(!storage.delete("access_token").unwrap());

        storage.delete_many(&["access_token", "refresh_token"]).unwrap();
        assert!(!storage.has("refresh_token").unwrap());
        assert!(!dir.path().join("credentials.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStorage::open(&path),
            Err(StorageError::Encoding(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set("access_token", "abc").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
