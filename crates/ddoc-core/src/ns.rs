#![forbid(unsafe_code)]

//! DigiDoc namespace, element and attribute names.

/// DigiDoc 1.3 namespace, declared on `SignedDoc` and `DataFile` elements.
pub const DIGIDOC_13: &str = "http://www.sk.ee/DigiDoc/v1.3.0#";

/// XML namespace (always in scope, never rendered).
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

// ── Element names ────────────────────────────────────────────────────

pub mod node {
    pub const SIGNED_DOC: &str = "SignedDoc";
    pub const DATA_FILE: &str = "DataFile";
    pub const DATA_FILE_INFO: &str = "DataFileInfo";
}

// ── Attribute names ──────────────────────────────────────────────────

pub mod attr {
    pub const XMLNS: &str = "xmlns";
    pub const FORMAT: &str = "format";
    pub const VERSION: &str = "version";
    pub const ID: &str = "Id";
    pub const CONTENT_TYPE: &str = "ContentType";
    pub const FILENAME: &str = "Filename";
    pub const MIME_TYPE: &str = "MimeType";
    pub const SIZE: &str = "Size";
    pub const DIGEST_TYPE: &str = "DigestType";
    pub const DIGEST_VALUE: &str = "DigestValue";
}

// ── Attribute values ─────────────────────────────────────────────────

pub mod content_type {
    pub const EMBEDDED_BASE64: &str = "EMBEDDED_BASE64";
    pub const HASHCODE: &str = "HASHCODE";
}

pub mod digest_type {
    pub const SHA1: &str = "sha1";
}

pub mod format {
    pub const SK_XML: &str = "SK-XML";
    pub const DIGIDOC_XML: &str = "DIGIDOC-XML";
}
