#![forbid(unsafe_code)]

//! File-system blob store.
//!
//! Layout: `<work_dir>/<scope>/<name>`, one file per stored DataFile. The
//! name is the `Id` itself when it is a safe path component, otherwise `~`
//! followed by the hex of the `Id` bytes. `~` never occurs in a safe
//! component, so the two forms cannot collide.

use crate::{is_safe_component, validate_id, BlobStore, Scope};
use ddoc_core::Error;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Stores blobs as files under a work directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Open the store at `root`, creating the directory and its parents.
    ///
    /// Paths with `..` components are rejected, as is a `root` that exists
    /// but is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(Error::Config("work directory path is empty".into()));
        }
        if root.components().any(|c| c == Component::ParentDir) {
            return Err(Error::Config(format!(
                "work directory must not contain '..': {}",
                root.display()
            )));
        }
        if root.exists() && !root.is_dir() {
            return Err(Error::Config(format!(
                "work directory exists but is not a directory: {}",
                root.display()
            )));
        }
        fs::create_dir_all(&root)?;
        log::info!("blob store opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scope_dir(&self, scope: &Scope) -> PathBuf {
        self.root.join(scope.as_str())
    }

    fn blob_path(&self, scope: &Scope, id: &str) -> PathBuf {
        self.scope_dir(scope).join(file_name(id))
    }
}

/// File name for a DataFile `Id`.
fn file_name(id: &str) -> String {
    if is_safe_component(id) {
        id.to_owned()
    } else {
        format!("~{}", hex::encode(id.as_bytes()))
    }
}

impl BlobStore for FileBlobStore {
    fn put(&self, scope: &Scope, id: &str, data: &[u8]) -> Result<(), Error> {
        validate_id(id)?;
        let dir = self.scope_dir(scope);
        fs::create_dir_all(&dir).map_err(|e| Error::blob_store(scope.as_str(), id, e))?;
        let path = dir.join(file_name(id));
        fs::write(&path, data).map_err(|e| Error::blob_store(scope.as_str(), id, e))?;
        log::debug!("stored {} bytes at {}", data.len(), path.display());
        Ok(())
    }

    fn get(&self, scope: &Scope, id: &str) -> Result<Option<Vec<u8>>, Error> {
        validate_id(id)?;
        let path = self.blob_path(scope, id);
        match fs::read(&path) {
            Ok(data) => {
                log::debug!("read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::blob_store(scope.as_str(), id, e)),
        }
    }

    fn remove_scope(&self, scope: &Scope) -> Result<usize, Error> {
        let dir = self.scope_dir(scope);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(Error::blob_store(scope.as_str(), "*", e)),
        };
        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|e| Error::blob_store(scope.as_str(), "*", e))?;
            if entry.path().is_file() {
                count += 1;
            }
        }
        fs::remove_dir_all(&dir).map_err(|e| Error::blob_store(scope.as_str(), "*", e))?;
        log::info!("removed {count} blobs for scope {scope}");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_nested_work_dir() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("a").join("b");
        let store = FileBlobStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn test_open_rejects_parent_components() {
        assert!(matches!(
            FileBlobStore::open("tmp/../etc"),
            Err(Error::Config(_))
        ));
        assert!(FileBlobStore::open("").is_err());
    }

    #[test]
    fn test_open_rejects_regular_file() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("plain");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(FileBlobStore::open(&file), Err(Error::Config(_))));
    }

    #[test]
    fn test_put_get_roundtrip_preserves_bytes() {
        let tmp = tempdir().unwrap();
        let store = FileBlobStore::open(tmp.path()).unwrap();
        let scope = Scope::new("sess1").unwrap();
        let markup = "<DataFile Filename=\"õäöü.txt\" Id=\"D0\">QQ==\r\n</DataFile>";

        store.put(&scope, "D0", markup.as_bytes()).unwrap();
        let back = store.get(&scope, "D0").unwrap().unwrap();
        assert_eq!(back, markup.as_bytes());
        assert!(tmp.path().join("sess1").join("D0").is_file());
    }

    #[test]
    fn test_missing_blob_is_none() {
        let tmp = tempdir().unwrap();
        let store = FileBlobStore::open(tmp.path()).unwrap();
        let scope = Scope::new("sess1").unwrap();
        assert_eq!(store.get(&scope, "D9").unwrap(), None);
    }

    #[test]
    fn test_scopes_are_isolated() {
        let tmp = tempdir().unwrap();
        let store = FileBlobStore::open(tmp.path()).unwrap();
        let a = Scope::new("a").unwrap();
        let a_b = Scope::new("a_b").unwrap();
        store.put(&a, "b_D0", b"one").unwrap();
        store.put(&a_b, "D0", b"two").unwrap();
        assert_eq!(store.get(&a, "b_D0").unwrap().unwrap(), b"one");
        assert_eq!(store.get(&a_b, "D0").unwrap().unwrap(), b"two");
    }

    #[test]
    fn test_remove_scope() {
        let tmp = tempdir().unwrap();
        let store = FileBlobStore::open(tmp.path()).unwrap();
        let scope = Scope::new("sess1").unwrap();
        store.put(&scope, "D0", b"x").unwrap();
        store.put(&scope, "D1", b"y").unwrap();

        assert_eq!(store.remove_scope(&scope).unwrap(), 2);
        assert!(!tmp.path().join("sess1").exists());
        assert_eq!(store.remove_scope(&scope).unwrap(), 0);
    }

    #[test]
    fn test_file_names_for_unsafe_ids() {
        assert_eq!(file_name("D0"), "D0");
        assert_eq!(file_name("D 0"), "~442030");
        assert_eq!(file_name(".."), "~2e2e");
        assert_eq!(file_name("a/b"), "~612f62");
    }

    #[test]
    fn test_unsafe_ids_stay_inside_scope_dir() {
        let tmp = tempdir().unwrap();
        let store = FileBlobStore::open(tmp.path().join("work")).unwrap();
        let scope = Scope::new("sess1").unwrap();
        for (n, id) in ["D 0", "../D0", "a/b", "õ:1", ".."].iter().enumerate() {
            let data = format!("blob{n}");
            store.put(&scope, id, data.as_bytes()).unwrap();
            assert_eq!(store.get(&scope, id).unwrap().unwrap(), data.as_bytes());
        }
        assert!(!tmp.path().join("D0").exists());
        assert!(!tmp.path().join("work").join("D0").exists());
        let stored = fs::read_dir(tmp.path().join("work").join("sess1"))
            .unwrap()
            .count();
        assert_eq!(stored, 5);
        assert!(matches!(store.put(&scope, "", b"x"), Err(Error::InvalidId(_))));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let tmp = tempdir().unwrap();
        let store = FileBlobStore::open(tmp.path()).unwrap();
        let scope = Scope::new("ro").unwrap();
        // A regular file where the scope directory should be.
        fs::write(tmp.path().join("ro"), b"").unwrap();

        let err = store.put(&scope, "D0", b"x").unwrap_err();
        assert!(matches!(err, Error::BlobStore { ref id, .. } if id == "D0"));
    }
}
