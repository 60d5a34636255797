#![forbid(unsafe_code)]

//! Canonical rendering of DigiDoc `DataFile` elements.
//!
//! The DataFile digest is computed over the canonical embedded form, so the
//! rendering order is fixed:
//!
//! 1. the default namespace declaration (always present, `xmlns=""` when
//!    no namespace is in scope), then prefixed declarations;
//! 2. all other attributes in ordinal order of their names;
//! 3. `ContentType` with the target value;
//! 4. for the hashcode form only, `DigestType="sha1"` and `DigestValue`;
//! 5. the element body (base64 payload for embedded form, empty for hashcode).

pub mod escape;
pub mod render;

use ddoc_core::{ns, Error};
use ddoc_xml::DataFileAttributes;
use render::{Attr, NsDecl};

/// Representation to render a DataFile in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `ContentType="EMBEDDED_BASE64"`, payload kept inline.
    Embedded,
    /// `ContentType="HASHCODE"` with the given base64 SHA-1 digest.
    Hashcode { digest_value: String },
}

impl Target {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Embedded => ns::content_type::EMBEDDED_BASE64,
            Self::Hashcode { .. } => ns::content_type::HASHCODE,
        }
    }
}

/// Attributes that are always rendered after the sorted block.
const TRAILING_ATTRS: [&str; 3] = [
    ns::attr::CONTENT_TYPE,
    ns::attr::DIGEST_TYPE,
    ns::attr::DIGEST_VALUE,
];

/// Render a DataFile element in canonical form.
///
/// - `attrs`: the element's attributes as extracted from its markup
/// - `body`: payload for [`Target::Embedded`]; ignored for hashcode
/// - `target`: representation to produce
/// - `inherited_namespace`: default namespace in scope at the element
///   (normally the `SignedDoc` namespace), used when the element declares
///   none itself; with neither, `xmlns=""` is rendered
pub fn canonicalize(
    attrs: &DataFileAttributes,
    body: &str,
    target: &Target,
    inherited_namespace: Option<&str>,
) -> Result<String, Error> {
    if attrs.attrs.is_empty() {
        return Err(Error::Canonicalization("DataFile has no attributes".into()));
    }
    if let Target::Hashcode { digest_value } = target {
        if digest_value.is_empty() {
            return Err(Error::Canonicalization("empty digest value".into()));
        }
    }

    let mut out = String::with_capacity(body.len() + 256);
    out.push('<');
    out.push_str(ns::node::DATA_FILE);

    let default_ns = attrs
        .namespace
        .as_deref()
        .or(inherited_namespace)
        .unwrap_or_default();
    out.push_str(&NsDecl::default_ns(default_ns).render());
    let mut decls: Vec<NsDecl> = attrs
        .prefixed_namespaces
        .iter()
        .map(|(prefix, uri)| NsDecl::prefixed(prefix, uri))
        .collect();
    decls.sort();
    for decl in &decls {
        out.push_str(&decl.render());
    }

    let mut sorted: Vec<Attr> = attrs
        .attrs
        .iter()
        .filter(|(name, _)| !TRAILING_ATTRS.contains(&name.as_str()))
        .map(|(name, value)| Attr::new(name.as_str(), value.as_str()))
        .collect();
    sorted.sort();
    for attr in &sorted {
        out.push_str(&attr.render());
    }

    out.push_str(&Attr::new(ns::attr::CONTENT_TYPE, target.content_type()).render());

    match target {
        Target::Embedded => {
            out.push('>');
            out.push_str(body);
        }
        Target::Hashcode { digest_value } => {
            out.push_str(&Attr::new(ns::attr::DIGEST_TYPE, ns::digest_type::SHA1).render());
            out.push_str(&Attr::new(ns::attr::DIGEST_VALUE, digest_value.as_str()).render());
            out.push('>');
        }
    }

    out.push_str("</");
    out.push_str(ns::node::DATA_FILE);
    out.push('>');
    Ok(out)
}
