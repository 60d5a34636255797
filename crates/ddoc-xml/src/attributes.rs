#![forbid(unsafe_code)]

//! In-memory attribute extraction for a single element.
//!
//! The element text is parsed with `roxmltree` straight from the borrowed
//! `&str`. Values are never written out and read back, so non-ASCII
//! filenames keep their exact UTF-8 bytes.

use ddoc_core::{ns, Error};

/// Attributes of one `DataFile` (or `SignedDoc`) opening tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFileAttributes {
    /// Element name as written, e.g. `DataFile` or `DataFileInfo`.
    pub element: String,
    /// Default namespace declared on the element (`xmlns="…"`).
    pub namespace: Option<String>,
    /// Prefixed namespace declarations as `(prefix, uri)`.
    pub prefixed_namespaces: Vec<(String, String)>,
    /// Attributes in document order, keyed by qualified name. Values are
    /// unescaped.
    pub attrs: Vec<(String, String)>,
}

impl DataFileAttributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(idx).1)
    }

    pub fn id(&self) -> Option<&str> {
        self.get(ns::attr::ID)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get(ns::attr::CONTENT_TYPE)
    }

    pub fn is_hashcode(&self) -> bool {
        self.content_type() == Some(ns::content_type::HASHCODE)
    }

    /// True when neither attributes nor a namespace were found.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty() && self.namespace.is_none() && self.prefixed_namespaces.is_empty()
    }
}

/// Parse a complete element (opening tag through closing tag, or a single
/// self-closing tag) and return the root element's attributes.
pub fn parse_attributes(element_xml: &str) -> Result<DataFileAttributes, Error> {
    let doc = roxmltree::Document::parse(element_xml).map_err(|e| Error::XmlParse(e.to_string()))?;
    let root = doc.root_element();

    let mut out = DataFileAttributes {
        element: root.tag_name().name().to_owned(),
        ..Default::default()
    };

    for decl in root.namespaces() {
        if decl.uri() == ns::XML {
            continue;
        }
        match decl.name() {
            None => out.namespace = Some(decl.uri().to_owned()),
            Some(prefix) => out
                .prefixed_namespaces
                .push((prefix.to_owned(), decl.uri().to_owned())),
        }
    }

    for attr in root.attributes() {
        let name = match attr.namespace() {
            Some(uri) => match root.lookup_prefix(uri) {
                Some(prefix) => format!("{prefix}:{}", attr.name()),
                None => attr.name().to_owned(),
            },
            None => attr.name().to_owned(),
        };
        out.attrs.push((name, attr.value().to_owned()));
    }

    Ok(out)
}

/// Parse only an opening tag such as `<SignedDoc format="…">`.
///
/// The tag is closed in memory so it can be parsed without the (possibly
/// very large) element body.
pub fn parse_open_tag(tag: &str) -> Result<DataFileAttributes, Error> {
    let inner = tag
        .trim_end()
        .strip_suffix('>')
        .ok_or_else(|| Error::XmlParse(format!("not an opening tag: {tag}")))?;
    let inner = inner.strip_suffix('/').unwrap_or(inner);
    parse_attributes(&format!("{inner}/>"))
}
