#![forbid(unsafe_code)]

//! DataFile transforms for DigiDoc containers.
//!
//! Converts embedded (`EMBEDDED_BASE64`) DataFiles to hashcode form and back,
//! builds new DataFiles from user files, and reports per-element digests.
//! Originals are kept in a [`ddoc_store::BlobStore`] between the two
//! directions.

pub mod builder;
pub mod context;
pub mod embedded;
pub mod hashcode;
pub mod pipeline;
pub mod report;

pub use builder::{build_data_file, DataFileDescriptor, UserFile, DEFAULT_ID};
pub use context::TransformContext;
pub use embedded::to_embedded;
pub use hashcode::to_hashcode;
pub use pipeline::{apply_to_container, DataFileTransform};
pub use report::{digest_report, DataFileDigest};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::context::TransformContext;
    use ddoc_core::{ns, Error};
    use ddoc_store::{BlobStore, MemoryBlobStore, Scope};
    use std::io;
    use std::sync::Arc;

    pub fn ctx() -> (TransformContext, Arc<MemoryBlobStore>) {
        let store = Arc::new(MemoryBlobStore::new());
        (TransformContext::new(store.clone()), store)
    }

    pub fn container(format: &str, version: &str, body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<SignedDoc format=\"{format}\" version=\"{version}\" xmlns=\"{}\">\n{body}\n<Signature Id=\"S0\"></Signature>\n</SignedDoc>\n",
            ns::DIGIDOC_13
        )
    }

    /// Store whose every operation fails.
    pub struct FailingStore;

    impl BlobStore for FailingStore {
        fn put(&self, scope: &Scope, id: &str, _: &[u8]) -> Result<(), Error> {
            Err(Error::blob_store(
                scope.as_str(),
                id,
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn get(&self, scope: &Scope, id: &str) -> Result<Option<Vec<u8>>, Error> {
            Err(Error::blob_store(
                scope.as_str(),
                id,
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn remove_scope(&self, _: &Scope) -> Result<usize, Error> {
            Ok(0)
        }
    }
}
