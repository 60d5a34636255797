#![forbid(unsafe_code)]

//! Digest computation for the ddoc DataFile transform engine.
//!
//! DataFile digests are SHA-1 over the canonical embedded form after CRLF
//! normalization, carried as base64 in the `DigestValue` attribute.

pub mod digest;

pub use digest::{data_file_digest, from_type, normalize_line_endings, DigestAlgorithm};
