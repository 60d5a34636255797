#![forbid(unsafe_code)]

//! Shared rendering utilities for canonical DataFile output.

use crate::escape;

/// A namespace declaration on the canonical element.
///
/// Ordering puts the default declaration (`prefix: None`) first, then
/// prefixed declarations by prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NsDecl {
    pub prefix: Option<String>,
    pub uri: String,
}

impl NsDecl {
    pub fn default_ns(uri: &str) -> Self {
        Self {
            prefix: None,
            uri: uri.to_owned(),
        }
    }

    pub fn prefixed(prefix: &str, uri: &str) -> Self {
        Self {
            prefix: Some(prefix.to_owned()),
            uri: uri.to_owned(),
        }
    }

    pub fn render(&self) -> String {
        let uri = escape::escape_attr(&self.uri);
        match &self.prefix {
            None => format!(" xmlns=\"{uri}\""),
            Some(prefix) => format!(" xmlns:{prefix}=\"{uri}\""),
        }
    }
}

/// A non-namespace attribute of the canonical element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    /// Qualified name as written, e.g. `Id` or `x:extra`.
    pub name: String,
    /// The unescaped attribute value.
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(" {}=\"{}\"", self.name, escape::escape_attr(&self.value))
    }
}

impl Ord for Attr {
    // Ordinal (byte-wise) order of the qualified name; uppercase sorts
    // before lowercase.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name
            .as_bytes()
            .cmp(other.name.as_bytes())
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for Attr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_ordinal_order() {
        let mut attrs = vec![
            Attr::new("Size", "1"),
            Attr::new("MimeType", "x"),
            Attr::new("aLower", "y"),
            Attr::new("Filename", "f"),
            Attr::new("Id", "D0"),
        ];
        attrs.sort();
        let names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Filename", "Id", "MimeType", "Size", "aLower"]);
    }

    #[test]
    fn test_ns_decl_order_and_render() {
        let mut decls = vec![
            NsDecl::prefixed("b", "urn:b"),
            NsDecl::default_ns("urn:d"),
            NsDecl::prefixed("a", "urn:a"),
        ];
        decls.sort();
        let rendered: String = decls.iter().map(NsDecl::render).collect();
        assert_eq!(rendered, r#" xmlns="urn:d" xmlns:a="urn:a" xmlns:b="urn:b""#);
    }

    #[test]
    fn test_attr_render_escapes() {
        assert_eq!(Attr::new("Filename", "a&b").render(), r#" Filename="a&amp;b""#);
    }
}
