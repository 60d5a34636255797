#![forbid(unsafe_code)]

//! Hashcode → embedded conversion.

use crate::context::TransformContext;
use crate::pipeline::{apply_to_container, DataFileTransform};
use ddoc_core::Error;
use ddoc_store::Scope;
use std::io;

/// Restore every hashcode DataFile of `xml` from the blob store.
///
/// The stored markup is substituted byte for byte. Elements with no stored
/// original are left in hashcode form.
pub fn to_embedded(ctx: &TransformContext, xml: &str, scope: &Scope) -> Result<String, Error> {
    apply_to_container(&EmbeddedTransform { ctx, scope }, xml)
}

struct EmbeddedTransform<'a> {
    ctx: &'a TransformContext,
    scope: &'a Scope,
}

impl DataFileTransform for EmbeddedTransform<'_> {
    fn name(&self) -> &str {
        "to-embedded"
    }

    fn apply(&self, element: &str) -> Result<Option<String>, Error> {
        let attrs = match ddoc_xml::parse_attributes(element) {
            Ok(attrs) => attrs,
            Err(e) => {
                log::warn!("skipping unparsable DataFile: {e}");
                return Ok(None);
            }
        };
        if !attrs.is_hashcode() {
            return Ok(None);
        }
        let Some(id) = attrs.id().filter(|id| !id.is_empty()) else {
            log::warn!("skipping hashcode DataFile without Id");
            return Ok(None);
        };

        let Some(blob) = self.ctx.store.get(self.scope, id)? else {
            log::info!("no stored original for DataFile {id} in scope {}", self.scope);
            return Ok(None);
        };
        let original = String::from_utf8(blob).map_err(|e| {
            Error::blob_store(
                self.scope.as_str(),
                id,
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        log::debug!("DataFile {id} restored to embedded form");
        Ok(Some(original))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashcode::to_hashcode;
    use crate::test_support::{container, ctx};
    use ddoc_store::{BlobStore, FileBlobStore};
    use std::sync::Arc;

    #[test]
    fn test_round_trip_identity() {
        let (ctx, _) = ctx();
        let scope = Scope::new("s1").unwrap();
        let body = "<DataFile Size=\"3\" Id=\"D0\" Filename=\"šžõäöü.txt\" ContentType=\"EMBEDDED_BASE64\" MimeType=\"text/plain\">QUJD\r\n</DataFile>\n<DataFile Id=\"D1\" ContentType=\"EMBEDDED_BASE64\" Filename=\"a&amp;b.txt\">REVG</DataFile>";
        let xml = container("DIGIDOC-XML", "1.3", body);

        let hashed = to_hashcode(&ctx, &xml, &scope).unwrap();
        assert_ne!(hashed, xml);
        assert_eq!(to_embedded(&ctx, &hashed, &scope).unwrap(), xml);
    }

    #[test]
    fn test_round_trip_through_file_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Arc::new(FileBlobStore::open(tmp.path().join("work")).unwrap());
        let ctx = TransformContext::new(store);
        let scope = Scope::new("abc123").unwrap();
        let xml = container(
            "DIGIDOC-XML",
            "1.3",
            r#"<DataFile Id="D0" ContentType="EMBEDDED_BASE64" Filename="õ.txt">QUJD</DataFile>"#,
        );
        let hashed = to_hashcode(&ctx, &xml, &scope).unwrap();
        assert_eq!(to_embedded(&ctx, &hashed, &scope).unwrap(), xml);
    }

    #[test]
    fn test_ids_unusable_as_file_names_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Arc::new(FileBlobStore::open(tmp.path().join("work")).unwrap());
        let ctx = TransformContext::new(store.clone());
        let scope = Scope::new("abc123").unwrap();
        let body = "<DataFile Id=\"D 0\" ContentType=\"EMBEDDED_BASE64\">QUJD</DataFile>\n<DataFile Id=\"ü:1\" ContentType=\"EMBEDDED_BASE64\">REVG</DataFile>\n<DataFile Id=\"../D2\" ContentType=\"EMBEDDED_BASE64\">R0hJ</DataFile>";
        let xml = container("DIGIDOC-XML", "1.3", body);

        let hashed = to_hashcode(&ctx, &xml, &scope).unwrap();
        assert_eq!(hashed.matches("ContentType=\"HASHCODE\"").count(), 3);
        for id in ["D 0", "ü:1", "../D2"] {
            assert!(store.get(&scope, id).unwrap().is_some(), "{id} not stored");
        }
        assert!(!tmp.path().join("D2").exists());
        assert_eq!(to_embedded(&ctx, &hashed, &scope).unwrap(), xml);
    }

    #[test]
    fn test_missing_blob_leaves_hashcode() {
        let (ctx, _) = ctx();
        let scope = Scope::new("s1").unwrap();
        let df = r#"<DataFile ContentType="HASHCODE" DigestType="sha1" DigestValue="X=" Id="D7"></DataFile>"#;
        let xml = container("DIGIDOC-XML", "1.3", df);
        assert_eq!(to_embedded(&ctx, &xml, &scope).unwrap(), xml);
    }

    #[test]
    fn test_scopes_do_not_mix() {
        let (ctx, _) = ctx();
        let a = Scope::new("a").unwrap();
        let b = Scope::new("b").unwrap();
        let xml = container(
            "DIGIDOC-XML",
            "1.3",
            r#"<DataFile Id="D0" ContentType="EMBEDDED_BASE64">QQ==</DataFile>"#,
        );
        let hashed = to_hashcode(&ctx, &xml, &a).unwrap();
        assert_eq!(to_embedded(&ctx, &hashed, &b).unwrap(), hashed);
    }

    #[test]
    fn test_embedded_elements_untouched() {
        let (ctx, store) = ctx();
        let scope = Scope::new("s1").unwrap();
        store.put(&scope, "D0", b"<DataFile Id=\"D0\">other</DataFile>").unwrap();
        let xml = container(
            "DIGIDOC-XML",
            "1.3",
            r#"<DataFile Id="D0" ContentType="EMBEDDED_BASE64">QQ==</DataFile>"#,
        );
        assert_eq!(to_embedded(&ctx, &xml, &scope).unwrap(), xml);
    }

    #[test]
    fn test_non_utf8_blob_is_error() {
        let (ctx, store) = ctx();
        let scope = Scope::new("s1").unwrap();
        store.put(&scope, "D0", &[0xff, 0xfe]).unwrap();
        let xml = r#"<DataFile ContentType="HASHCODE" Id="D0"></DataFile>"#;
        assert!(matches!(
            to_embedded(&ctx, xml, &scope),
            Err(Error::BlobStore { .. })
        ));
    }
}
