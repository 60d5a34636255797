#![forbid(unsafe_code)]

//! Blob store and rendering settings shared by the DataFile transforms.

use ddoc_core::ns;
use ddoc_store::BlobStore;
use std::sync::Arc;

/// Default line width of base64 payload in freshly built DataFiles.
pub const DEFAULT_BASE64_LINE_WIDTH: usize = 64;

/// Context for DataFile transforms.
pub struct TransformContext {
    /// Storage for original embedded-form DataFiles.
    pub store: Arc<dyn BlobStore>,
    /// Line width of base64 payload in freshly built DataFiles.
    pub base64_line_width: usize,
    /// Namespace declared on freshly built DataFiles of 1.3 containers.
    pub namespace: String,
}

impl TransformContext {
    /// Create a new context over the given blob store.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            base64_line_width: DEFAULT_BASE64_LINE_WIDTH,
            namespace: ns::DIGIDOC_13.to_owned(),
        }
    }

    pub fn with_line_width(mut self, width: usize) -> Self {
        self.base64_line_width = width;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}
