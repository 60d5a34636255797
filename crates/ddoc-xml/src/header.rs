#![forbid(unsafe_code)]

//! Container format/version detection from the `SignedDoc` opening tag.

use crate::attributes::parse_open_tag;
use crate::scanner::TagScanner;
use ddoc_core::{ns, ContainerFormat, ContainerHeader};

/// Read format, version and default namespace from a container.
///
/// Only the `SignedDoc` opening tag is inspected. Empty input is treated as
/// a new `DIGIDOC-XML` 1.3 container; a missing or malformed header yields
/// [`ContainerHeader::unknown`], whose policy leaves DataFiles untouched.
pub fn detect(xml: &str) -> ContainerHeader {
    if xml.trim().is_empty() {
        return ContainerHeader::digidoc_13();
    }

    let mut scanner = TagScanner::new(xml, ns::node::SIGNED_DOC);
    let Some((start, end)) = scanner.next_open_tag() else {
        log::warn!("no <SignedDoc> header found, container format unknown");
        return ContainerHeader::unknown();
    };

    let attrs = match parse_open_tag(&xml[start..end]) {
        Ok(attrs) => attrs,
        Err(e) => {
            log::warn!("malformed <SignedDoc> header: {e}");
            return ContainerHeader::unknown();
        }
    };

    let format = attrs
        .get(ns::attr::FORMAT)
        .map(ContainerFormat::from_attr)
        .unwrap_or(ContainerFormat::Unknown);
    let version = attrs.get(ns::attr::VERSION).unwrap_or_default();

    let header = ContainerHeader::new(format, version).with_namespace(attrs.namespace);
    log::debug!("detected container {header}, policy {:?}", header.policy());
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddoc_core::{HashingPolicy, PassthroughReason};

    #[test]
    fn test_detect_digidoc_13() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<SignedDoc format="DIGIDOC-XML" version="1.3" xmlns="http://www.sk.ee/DigiDoc/v1.3.0#">
<DataFile Id="D0">QQ==</DataFile>
</SignedDoc>"#;
        let header = detect(xml);
        assert_eq!(header.format, ContainerFormat::DigiDocXml);
        assert_eq!(header.version, "1.3");
        assert_eq!(header.namespace.as_deref(), Some(ns::DIGIDOC_13));
        assert_eq!(header.policy(), HashingPolicy::Hashcode);
    }

    #[test]
    fn test_detect_sk_xml() {
        let header = detect(r#"<SignedDoc format="SK-XML" version="1.0"></SignedDoc>"#);
        assert_eq!(header.format, ContainerFormat::SkXml);
        assert_eq!(header.version, "1.0");
    }

    #[test]
    fn test_empty_input_defaults_to_13() {
        assert_eq!(detect(""), ContainerHeader::digidoc_13());
        assert_eq!(detect("  \n"), ContainerHeader::digidoc_13());
    }

    #[test]
    fn test_missing_header_is_conservative() {
        let header = detect(r#"<DataFile Id="D0">QQ==</DataFile>"#);
        assert_eq!(header.format, ContainerFormat::Unknown);
        assert_eq!(
            header.policy(),
            HashingPolicy::Passthrough(PassthroughReason::Undetected)
        );
    }

    #[test]
    fn test_malformed_header_is_conservative() {
        let header = detect(r#"<SignedDoc format="DIGIDOC-XML version=1.3>"#);
        assert_eq!(header.format, ContainerFormat::Unknown);
    }

    #[test]
    fn test_header_without_format_is_unknown() {
        let header = detect(r#"<SignedDoc version="1.3"></SignedDoc>"#);
        assert_eq!(header.format, ContainerFormat::Unknown);
        assert_eq!(header.version, "1.3");
    }

    #[test]
    fn test_signed_doc_attribute_text_is_not_matched_in_body() {
        let xml = r#"<Wrapper><SignedDocument/><SignedDoc format="DIGIDOC-XML" version="1.2"/></Wrapper>"#;
        let header = detect(xml);
        assert_eq!(header.version, "1.2");
    }
}
