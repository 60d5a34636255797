#![forbid(unsafe_code)]

//! Container-level XML handling for the ddoc transform engine.
//!
//! Provides a streaming tag scanner that locates `DataFile` elements by byte
//! offset, in-memory attribute extraction over `roxmltree`, and detection of
//! the container's format and version from its `SignedDoc` header.

pub mod attributes;
pub mod header;
pub mod scanner;

pub use attributes::{parse_attributes, parse_open_tag, DataFileAttributes};
pub use header::detect;
pub use scanner::{locate_data_files, ElementSpan, TagScanner};
