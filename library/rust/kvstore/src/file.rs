use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{validate_key, KeyValueStore, StoreError};

/// FileKeyValueStore はデータディレクトリ配下に `<key>.json` としてドキュメントを保存する。
///
/// 書き込みは同じディレクトリに作った一時ファイルへ書いてから rename するため、
/// 読み手が書きかけのドキュメントを見ることはない。
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// データディレクトリを開く。存在しなければ作成する。
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            // UTF-8 として読めないファイルは壊れたドキュメントとして扱う
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(StoreError::Corrupt {
                key: key.to_string(),
            }),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(key, bytes = value.len(), "document written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("admin_columns", r#"[{"id":"name"}]"#).unwrap();
        assert_eq!(
            store.get("admin_columns").unwrap().as_deref(),
            Some(r#"[{"id":"name"}]"#)
        );
        assert!(dir.path().join("admin_columns.json").exists());
    }

    #[test]
    fn test_get_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        assert!(store.get("admin_users").unwrap().is_none());
    }

    #[test]
    fn test_overwrite_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("admin_users", "[1]").unwrap();
        store.set("admin_users", "[1,2]").unwrap();
        assert_eq!(store.get("admin_users").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("admin_session", "{}").unwrap();
        assert!(store.remove("admin_session").unwrap());
        assert!(!store.remove("admin_session").unwrap());
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("forgefit");
        let store = FileKeyValueStore::open(&nested).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_non_utf8_document_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("admin_users.json"), [0xff, 0xfe, 0x00]).unwrap();
        let err = store.get("admin_users").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_path_traversal_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "{}"),
            Err(StoreError::InvalidKey { .. })
        ));
    }
}
