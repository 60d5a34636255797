#![forbid(unsafe_code)]

//! Per-element digest report, for diagnosing signature mismatches.

use ddoc_c14n::{canonicalize, escape::strip_tags, Target};
use ddoc_core::ns;
use ddoc_crypto::{data_file_digest, from_type};
use ddoc_xml::locate_data_files;

/// Digest information for one located DataFile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFileDigest {
    pub id: Option<String>,
    pub content_type: Option<String>,
    /// `DigestType` carried by the element, `sha1` when absent.
    pub digest_type: String,
    /// `DigestValue` carried by the element, if any.
    pub declared_digest: Option<String>,
    /// Digest of the canonical embedded form. `None` for hashcode elements
    /// and whenever `problem` is set.
    pub computed_digest: Option<String>,
    /// Why the element could not be parsed, canonicalized or digested.
    pub problem: Option<String>,
}

/// List every DataFile of `xml` in document order with its digests.
///
/// The declared `DigestType` of each element is resolved; an unsupported
/// type is reported in [`DataFileDigest::problem`].
pub fn digest_report(xml: &str) -> Vec<DataFileDigest> {
    let header = ddoc_xml::detect(xml);
    let namespace = header.namespace.as_deref();

    locate_data_files(xml)
        .iter()
        .map(|span| {
            let element = span.text(xml);
            let attrs = match ddoc_xml::parse_attributes(element) {
                Ok(attrs) => attrs,
                Err(e) => {
                    log::warn!("unparsable DataFile at byte {}: {e}", span.start);
                    return DataFileDigest {
                        digest_type: ns::digest_type::SHA1.to_owned(),
                        problem: Some(e.to_string()),
                        ..Default::default()
                    };
                }
            };
            let digest_type = attrs
                .get(ns::attr::DIGEST_TYPE)
                .unwrap_or(ns::digest_type::SHA1);

            let computed = if attrs.is_hashcode() {
                from_type(digest_type).map(|_| None)
            } else {
                canonicalize(&attrs, &strip_tags(element), &Target::Embedded, namespace)
                    .and_then(|c| data_file_digest(digest_type, &c))
                    .map(Some)
            };
            let (computed_digest, problem) = match computed {
                Ok(digest) => (digest, None),
                Err(e) => {
                    log::warn!("DataFile {:?}: {e}", attrs.id());
                    (None, Some(e.to_string()))
                }
            };

            DataFileDigest {
                id: attrs.id().map(str::to_owned),
                content_type: attrs.content_type().map(str::to_owned),
                digest_type: digest_type.to_owned(),
                declared_digest: attrs.get(ns::attr::DIGEST_VALUE).map(str::to_owned),
                computed_digest,
                problem,
            }
        })
        .collect()
}
