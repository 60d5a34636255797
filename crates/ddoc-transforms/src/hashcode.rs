#![forbid(unsafe_code)]

//! Embedded → hashcode conversion.
//!
//! Each embedded DataFile is stored verbatim in the blob store and replaced
//! by its hashcode form, whose `DigestValue` is the SHA-1 of the element's
//! canonical embedded rendering.

use crate::context::TransformContext;
use crate::pipeline::{apply_to_container, DataFileTransform};
use ddoc_c14n::{canonicalize, escape::strip_tags, Target};
use ddoc_core::{ns, Error, HashingPolicy};
use ddoc_crypto::data_file_digest;
use ddoc_store::Scope;

/// Convert every embedded DataFile of `xml` to hashcode form.
///
/// Containers whose format or version does not allow hashing are returned
/// unchanged. Elements that cannot be parsed or canonicalized are left as
/// they are; only a blob store failure aborts the conversion.
pub fn to_hashcode(ctx: &TransformContext, xml: &str, scope: &Scope) -> Result<String, Error> {
    let header = ddoc_xml::detect(xml);
    match header.policy() {
        HashingPolicy::Passthrough(reason) => {
            log::info!("container {header} left unchanged ({reason:?})");
            Ok(xml.to_owned())
        }
        HashingPolicy::Hashcode => {
            let transform = HashcodeTransform {
                ctx,
                scope,
                namespace: header.namespace.as_deref(),
            };
            apply_to_container(&transform, xml)
        }
    }
}

struct HashcodeTransform<'a> {
    ctx: &'a TransformContext,
    scope: &'a Scope,
    /// Default namespace of the enclosing `SignedDoc`.
    namespace: Option<&'a str>,
}

impl DataFileTransform for HashcodeTransform<'_> {
    fn name(&self) -> &str {
        "to-hashcode"
    }

    fn apply(&self, element: &str) -> Result<Option<String>, Error> {
        let attrs = match ddoc_xml::parse_attributes(element) {
            Ok(attrs) => attrs,
            Err(e) => {
                log::warn!("skipping unparsable DataFile: {e}");
                return Ok(None);
            }
        };
        if attrs.is_hashcode() {
            log::debug!("DataFile {:?} already in hashcode form", attrs.id());
            return Ok(None);
        }
        let Some(id) = attrs.id().filter(|id| !id.is_empty()) else {
            log::warn!("skipping DataFile without Id");
            return Ok(None);
        };

        self.ctx.store.put(self.scope, id, element.as_bytes())?;

        let body = strip_tags(element);
        let hashcode = canonicalize(&attrs, &body, &Target::Embedded, self.namespace)
            .and_then(|embedded| data_file_digest(ns::digest_type::SHA1, &embedded))
            .and_then(|digest_value| {
                canonicalize(
                    &attrs,
                    "",
                    &Target::Hashcode { digest_value },
                    self.namespace,
                )
            });
        match hashcode {
            Ok(out) => {
                log::debug!("DataFile {id} converted to hashcode form");
                Ok(Some(out))
            }
            Err(e) => {
                log::warn!("DataFile {id} left embedded: {e}");
                Ok(None)
            }
        }
    }
}
