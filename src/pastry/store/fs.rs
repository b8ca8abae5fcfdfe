use super::DataStore;
use crate::error::{PastryError, Result};
use crate::model::Snippet;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const SNAPSHOT_FILENAME: &str = "pastes.json";

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `pastes.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SNAPSHOT_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory holding the snapshot file if it is missing.
    pub fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(PastryError::Io)?;
            }
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = format!(".pastes-{}.tmp", Uuid::new_v4());
        match self.path.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl DataStore for FileStore {
    fn save(&self, snippets: &[Snippet]) -> Result<()> {
        self.ensure_parent()?;
        let content = serde_json::to_string(snippets).map_err(PastryError::Serialization)?;

        let tmp_file = self.tmp_path();
        if let Err(e) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(PastryError::Io(e));
        }
        fs::rename(&tmp_file, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_file);
            PastryError::Io(e)
        })?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Snippet>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(PastryError::Io)?;
        let snippets: Vec<Snippet> =
            serde_json::from_str(&content).map_err(PastryError::Serialization)?;
        Ok(snippets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_preserves_order_and_timestamps() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        let base = Utc::now();
        let snippets = vec![
            Snippet::at("first", base - Duration::hours(2)),
            Snippet::at("second\nwith lines\n", base - Duration::minutes(3)),
            Snippet::at("thïrd ✓", base),
        ];

        store.save(&snippets).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, snippets);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        store
            .save(&[Snippet::new("a".into()), Snippet::new("b".into())])
            .unwrap();
        store.save(&[Snippet::new("c".into())]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "c");
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("cache").join("pastry");
        let store = FileStore::in_dir(&nested);
        store.save(&[Snippet::new("x".into())]).unwrap();
        assert!(nested.join(SNAPSHOT_FILENAME).exists());
    }

    #[test]
    fn test_save_leaves_no_tmp_files() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        store.save(&[Snippet::new("x".into())]).unwrap();

        for entry in fs::read_dir(dir.path()).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn test_corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PastryError::Serialization(_)));
    }
}
