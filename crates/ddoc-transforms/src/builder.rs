#![forbid(unsafe_code)]

//! Building a new DataFile from a user-supplied file.

use crate::context::TransformContext;
use base64::Engine;
use ddoc_c14n::{canonicalize, Target};
use ddoc_core::{ns, ContainerFormat, ContainerHeader, Error};
use ddoc_crypto::data_file_digest;
use ddoc_store::{validate_id, Scope};
use ddoc_xml::DataFileAttributes;

/// `Id` given to the first DataFile of a container.
pub const DEFAULT_ID: &str = "D0";

/// A file to be added to a container.
#[derive(Debug, Clone)]
pub struct UserFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// Everything a signing service needs to reference a new DataFile by hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileDescriptor {
    pub id: String,
    /// Unescaped file name.
    pub filename: String,
    pub mime_type: String,
    /// Always `HASHCODE`.
    pub content_type: String,
    /// Content length in bytes.
    pub size: usize,
    pub digest_type: String,
    pub digest_value: String,
    /// Canonical embedded-form element, as persisted in the blob store.
    pub embedded_xml: String,
}

/// Render `file` as an embedded DataFile, persist it under `(scope, id)` and
/// return its hashcode descriptor.
pub fn build_data_file(
    ctx: &TransformContext,
    header: &ContainerHeader,
    file: &UserFile,
    id: &str,
    scope: &Scope,
) -> Result<DataFileDescriptor, Error> {
    validate_id(id)?;
    if header.format == ContainerFormat::SkXml {
        return Err(Error::Other(
            "new DataFiles cannot be built for SK-XML containers".into(),
        ));
    }

    let body = wrap_base64(&file.content, ctx.base64_line_width)?;
    let size = file.content.len();
    let attrs = DataFileAttributes {
        element: ns::node::DATA_FILE.to_owned(),
        namespace: (header.version == "1.3").then(|| ctx.namespace.clone()),
        prefixed_namespaces: Vec::new(),
        attrs: vec![
            (ns::attr::FILENAME.to_owned(), file.name.clone()),
            (ns::attr::ID.to_owned(), id.to_owned()),
            (ns::attr::MIME_TYPE.to_owned(), file.mime_type.clone()),
            (ns::attr::SIZE.to_owned(), size.to_string()),
        ],
    };
    let embedded_xml = canonicalize(&attrs, &body, &Target::Embedded, None)?;

    ctx.store.put(scope, id, embedded_xml.as_bytes())?;
    let digest_value = data_file_digest(ns::digest_type::SHA1, &embedded_xml)?;
    log::info!("built DataFile {id} for {:?} ({size} bytes)", file.name);

    Ok(DataFileDescriptor {
        id: id.to_owned(),
        filename: file.name.clone(),
        mime_type: file.mime_type.clone(),
        content_type: ns::content_type::HASHCODE.to_owned(),
        size,
        digest_type: ns::digest_type::SHA1.to_owned(),
        digest_value,
        embedded_xml,
    })
}

/// Base64-encode `data` in lines of `width` characters, each ending in `\n`.
fn wrap_base64(data: &[u8], width: usize) -> Result<String, Error> {
    if width == 0 {
        return Err(Error::Config("base64 line width must be positive".into()));
    }
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / width + 1);
    let mut start = 0;
    while start < encoded.len() {
        let end = (start + width).min(encoded.len());
        out.push_str(&encoded[start..end]);
        out.push('\n');
        start = end;
    }
    Ok(out)
}
