#![forbid(unsafe_code)]

//! Core types shared across the ddoc DataFile transform engine.
//!
//! Holds the error type, DigiDoc element and attribute names, and the
//! container format enumeration that decides whether DataFile digests are
//! computed at all.

pub mod error;
pub mod format;
pub mod ns;

pub use error::{Error, Result};
pub use format::{ContainerFormat, ContainerHeader, HashingPolicy, PassthroughReason};
