#![forbid(unsafe_code)]

//! In-process blob store.

use crate::{validate_id, BlobStore, Scope};
use ddoc_core::Error;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Keeps blobs in a map; contents are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<(Scope, String), Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of blobs across all scopes.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(Scope, String), Vec<u8>>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.blobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, scope: &Scope, id: &str, data: &[u8]) -> Result<(), Error> {
        validate_id(id)?;
        self.lock()
            .insert((scope.clone(), id.to_owned()), data.to_vec());
        Ok(())
    }

    fn get(&self, scope: &Scope, id: &str) -> Result<Option<Vec<u8>>, Error> {
        validate_id(id)?;
        Ok(self.lock().get(&(scope.clone(), id.to_owned())).cloned())
    }

    fn remove_scope(&self, scope: &Scope) -> Result<usize, Error> {
        let mut blobs = self.lock();
        let before = blobs.len();
        blobs.retain(|(s, _), _| s != scope);
        Ok(before - blobs.len())
    }
}
