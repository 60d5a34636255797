#![forbid(unsafe_code)]

//! Scoped local storage for embedded-form DataFile elements.
//!
//! When a DataFile is converted to hashcode form its original markup is kept
//! here under `(scope, Id)`, so the embedded form can be restored when the
//! container comes back from the signing service. The scope isolates one
//! session or request from another and is always passed explicitly.

pub mod file;
pub mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use ddoc_core::Error;
use std::fmt;

/// Storage for original DataFile markup keyed by `(scope, Id)`.
///
/// Implementations must surface every write or read failure; a lost write
/// makes the later hashcode → embedded reconstruction impossible.
pub trait BlobStore: Send + Sync {
    /// Store `data` under `(scope, id)`, replacing any previous value.
    fn put(&self, scope: &Scope, id: &str, data: &[u8]) -> Result<(), Error>;

    /// Fetch the value stored under `(scope, id)`, if any.
    fn get(&self, scope: &Scope, id: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Drop everything stored for `scope`. Returns the number of blobs removed.
    fn remove_scope(&self, scope: &Scope) -> Result<usize, Error>;
}

/// A caller-supplied session or request identifier.
///
/// Two concurrent transactions must never share a scope. Only ASCII
/// letters, digits, `.`, `_` and `-` are accepted so a scope is always a
/// single safe path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope(String);

impl Scope {
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if !is_safe_component(&token) {
            return Err(Error::InvalidScope(token));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check that a DataFile `Id` can be used as a storage key.
///
/// Any non-empty `Id` is accepted; stores that need file names derive them
/// with their own encoding.
pub fn validate_id(id: &str) -> Result<(), Error> {
    if id.is_empty() {
        Err(Error::InvalidId(id.to_owned()))
    } else {
        Ok(())
    }
}

pub(crate) fn is_safe_component(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}
