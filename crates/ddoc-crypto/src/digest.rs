#![forbid(unsafe_code)]

//! Digest (hash) computation for DataFile elements.

use base64::Engine;
use ddoc_core::{ns, Error};
use digest::Digest;

/// Trait for digest algorithms named by a `DigestType` attribute.
pub trait DigestAlgorithm: Send {
    /// Feed data into the hash.
    fn update(&mut self, data: &[u8]);
    /// Finalize and return the hash value.
    fn finalize(self: Box<Self>) -> Vec<u8>;
    /// `DigestType` attribute value.
    fn name(&self) -> &'static str;
}

/// Create a digest algorithm from a `DigestType` value.
pub fn from_type(digest_type: &str) -> Result<Box<dyn DigestAlgorithm>, Error> {
    match digest_type {
        ns::digest_type::SHA1 => Ok(Box::new(Sha1Digest::new())),
        other => Err(Error::UnsupportedDigest(other.to_owned())),
    }
}

/// Replace every CRLF pair with a bare LF.
///
/// Lone CR characters are left alone.
pub fn normalize_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// Digest of a canonical embedded-form DataFile, base64 encoded.
///
/// `digest_type` is a `DigestType` attribute value. Line endings are
/// normalized before hashing; every path that produces a DataFile digest
/// must go through here.
pub fn data_file_digest(digest_type: &str, canonical: &str) -> Result<String, Error> {
    let mut hasher = from_type(digest_type)?;
    let normalized = normalize_line_endings(canonical);
    hasher.update(normalized.as_bytes());
    let name = hasher.name();
    let raw = hasher.finalize();
    log::debug!(
        "DataFile digest over {} bytes: {name} {}",
        normalized.len(),
        hex::encode(&raw)
    );
    Ok(base64::engine::general_purpose::STANDARD.encode(raw))
}

// ── Concrete implementations ─────────────────────────────────────────

struct Sha1Digest {
    inner: sha1::Sha1,
}

impl Sha1Digest {
    fn new() -> Self {
        Self {
            inner: sha1::Sha1::new(),
        }
    }
}

impl DigestAlgorithm for Sha1Digest {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.inner).to_vec()
    }

    fn name(&self) -> &'static str {
        ns::digest_type::SHA1
    }
}
