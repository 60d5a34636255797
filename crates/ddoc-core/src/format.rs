#![forbid(unsafe_code)]

//! Container format and version, and the hashing policy they imply.
//!
//! Older DigiDoc dialects (`SK-XML`, `DIGIDOC-XML` 1.1 and 1.2) compute the
//! DataFile digest differently, so their DataFile elements are never
//! converted to hashcode form.

use crate::ns;
use std::fmt;

/// The `format` attribute of a `SignedDoc` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerFormat {
    /// `SK-XML`, the pre-DigiDoc legacy format.
    SkXml,
    /// `DIGIDOC-XML`.
    DigiDocXml,
    /// A `format` value this engine does not know.
    Other(String),
    /// No `SignedDoc` header could be found or parsed.
    Unknown,
}

impl ContainerFormat {
    /// Parse the value of a `format` attribute.
    pub fn from_attr(value: &str) -> Self {
        match value {
            ns::format::SK_XML => Self::SkXml,
            ns::format::DIGIDOC_XML => Self::DigiDocXml,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The attribute value, if the format is known.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::SkXml => Some(ns::format::SK_XML),
            Self::DigiDocXml => Some(ns::format::DIGIDOC_XML),
            Self::Other(s) => Some(s),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unknown"))
    }
}

/// Why a container's DataFiles are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughReason {
    /// `SK-XML` container.
    SkXml,
    /// `DIGIDOC-XML` version 1.1 or 1.2.
    LegacyVersion,
    /// The header was missing or malformed.
    Undetected,
}

/// What the embedded → hashcode transform may do with a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashingPolicy {
    /// Leave every DataFile as it is.
    Passthrough(PassthroughReason),
    /// Convert embedded DataFiles to hashcode form.
    Hashcode,
}

impl HashingPolicy {
    pub fn allows_hashing(&self) -> bool {
        matches!(self, Self::Hashcode)
    }
}

/// Format, version and default namespace of a signed container, read once
/// from its `SignedDoc` opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub format: ContainerFormat,
    pub version: String,
    /// Default namespace declared on `SignedDoc`, inherited by DataFiles
    /// that do not declare their own.
    pub namespace: Option<String>,
}

impl ContainerHeader {
    pub fn new(format: ContainerFormat, version: impl Into<String>) -> Self {
        Self {
            format,
            version: version.into(),
            namespace: None,
        }
    }

    /// Header assumed for an empty container: `DIGIDOC-XML` 1.3.
    pub fn digidoc_13() -> Self {
        Self {
            format: ContainerFormat::DigiDocXml,
            version: "1.3".to_owned(),
            namespace: Some(ns::DIGIDOC_13.to_owned()),
        }
    }

    /// Header for a container whose `SignedDoc` tag could not be read.
    pub fn unknown() -> Self {
        Self {
            format: ContainerFormat::Unknown,
            version: String::new(),
            namespace: None,
        }
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    /// Decide whether DataFile digests apply to this container.
    pub fn policy(&self) -> HashingPolicy {
        match (&self.format, self.version.as_str()) {
            (ContainerFormat::SkXml, _) => HashingPolicy::Passthrough(PassthroughReason::SkXml),
            (ContainerFormat::DigiDocXml, "1.1" | "1.2") => {
                HashingPolicy::Passthrough(PassthroughReason::LegacyVersion)
            }
            (ContainerFormat::Unknown, _) => {
                HashingPolicy::Passthrough(PassthroughReason::Undetected)
            }
            (ContainerFormat::DigiDocXml | ContainerFormat::Other(_), _) => HashingPolicy::Hashcode,
        }
    }
}

impl fmt::Display for ContainerHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.format)
        } else {
            write!(f, "{} {}", self.format, self.version)
        }
    }
}
