use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::domain::errors::CartError;
use crate::domain::ports::PersistenceStore;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<std::io::Error> for CartError {
    fn from(e: std::io::Error) -> Self {
        CartError::PersistenceFailure(e.to_string())
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Directory-backed key-value store, one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens the store, creating `root` if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CartError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl PersistenceStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, CartError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), CartError> {
        let dest = self.path_for(key);
        let tmp = dest.with_extension("json.tmp");

        // Readers only ever see the old file or the complete new one.
        if let Err(e) = write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, &dest)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!("Saved {} bytes to {}", value.len(), dest.display());
        Ok(())
    }
}

fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_key_loads_as_none() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");

        assert_eq!(store.load("@RocketShoes:cart").expect("load"), None);
    }

    #[test]
    fn save_then_load_across_instances() {
        let dir = tempdir().expect("tempdir");
        FileStore::open(dir.path())
            .expect("open")
            .save("@RocketShoes:cart", "[]")
            .expect("save");

        let reopened = FileStore::open(dir.path()).expect("reopen");

        assert_eq!(
            reopened.load("@RocketShoes:cart").expect("load").as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn save_replaces_previous_value_without_leftovers() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");

        store.save("cart", "first").expect("save");
        store.save("cart", "second").expect("save");

        assert_eq!(store.load("cart").expect("load").as_deref(), Some("second"));
        let files: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(files, vec![std::ffi::OsString::from("cart.json")]);
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");

        store.save("@RocketShoes:cart", "[]").expect("save");

        assert!(dir.path().join("_RocketShoes_cart.json").exists());
    }

    #[test]
    fn open_creates_nested_directories() {
        let dir = tempdir().expect("tempdir");
        let root = dir.path().join("a").join("b");

        let store = FileStore::open(&root).expect("open");

        assert!(store.root().is_dir());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        // A directory in place of the target makes the final rename fail.
        fs::create_dir(dir.path().join("cart.json")).expect("mkdir");

        let err = store.save("cart", "[]").unwrap_err();

        assert!(matches!(err, CartError::PersistenceFailure(_)));
        assert!(!dir.path().join("cart.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        // Temp path is a symlink into a missing directory, so creating it fails.
        std::os::unix::fs::symlink(
            dir.path().join("missing").join("target"),
            dir.path().join("cart.json.tmp"),
        )
        .expect("symlink");

        let err = store.save("cart", "[]").unwrap_err();

        assert!(matches!(err, CartError::PersistenceFailure(_)));
        assert!(fs::symlink_metadata(dir.path().join("cart.json.tmp")).is_err());
        assert!(!dir.path().join("cart.json").exists());
    }

    #[test]
    fn save_into_removed_directory_fails() {
        let dir = tempdir().expect("tempdir");
        let root = dir.path().join("gone");
        let store = FileStore::open(&root).expect("open");
        fs::remove_dir_all(&root).expect("remove");

        let err = store.save("cart", "[]").unwrap_err();

        assert!(matches!(err, CartError::PersistenceFailure(_)));
    }
}
