#![forbid(unsafe_code)]

/// Errors produced by the ddoc DataFile transform engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    #[error("canonicalization error: {0}")]
    Canonicalization(String),

    #[error("unsupported digest type: {0}")]
    UnsupportedDigest(String),

    #[error("blob store error for {scope}/{id}: {source}")]
    BlobStore {
        scope: String,
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scope: {0}")]
    InvalidScope(String),

    #[error("invalid DataFile Id: {0}")]
    InvalidId(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O failure of the blob store for the given key.
    pub fn blob_store(scope: &str, id: &str, source: std::io::Error) -> Self {
        Error::BlobStore {
            scope: scope.to_owned(),
            id: id.to_owned(),
            source,
        }
    }
}
