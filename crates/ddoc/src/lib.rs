#![forbid(unsafe_code)]

//! DigiDoc DataFile hashcode/embedded transforms.
//!
//! Facade over the workspace crates plus the TOML configuration used by the
//! `ddoc` binary.

pub mod config;

pub use ddoc_c14n as c14n;
pub use ddoc_core as core;
pub use ddoc_crypto as crypto;
pub use ddoc_store as store;
pub use ddoc_transforms as transforms;
pub use ddoc_xml as xml;

pub use config::DdocConfig;
pub use ddoc_core::{Error, Result};
pub use ddoc_store::{BlobStore, FileBlobStore, MemoryBlobStore, Scope};
pub use ddoc_transforms::{build_data_file, to_embedded, to_hashcode, TransformContext};
