#![forbid(unsafe_code)]

//! TOML configuration for the `ddoc` binary.

use ddoc_core::{ns, Error};
use ddoc_store::FileBlobStore;
use ddoc_transforms::context::DEFAULT_BASE64_LINE_WIDTH;
use ddoc_transforms::TransformContext;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "ddoc.toml";

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdocConfig {
    /// Directory holding stored DataFile originals, one subdirectory per scope.
    pub work_dir: PathBuf,

    /// Line width of base64 content in newly built DataFiles.
    pub base64_line_width: usize,

    /// Namespace declared on newly built DataFiles of 1.3 containers.
    pub namespace: String,
}

impl Default for DdocConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("./tmp"),
            base64_line_width: DEFAULT_BASE64_LINE_WIDTH,
            namespace: ns::DIGIDOC_13.to_string(),
        }
    }
}

impl DdocConfig {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given; otherwise `ddoc.toml` if present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    log::debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.work_dir.as_os_str().is_empty() {
            return Err(Error::Config("work_dir must not be empty".into()));
        }
        if self.base64_line_width == 0 {
            return Err(Error::Config("base64_line_width must be positive".into()));
        }
        if self.namespace.trim().is_empty() {
            return Err(Error::Config("namespace must not be empty".into()));
        }
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Open the file blob store and build a transform context over it.
    pub fn transform_context(&self) -> Result<TransformContext, Error> {
        let store = FileBlobStore::open(&self.work_dir)?;
        Ok(TransformContext::new(Arc::new(store))
            .with_line_width(self.base64_line_width)
            .with_namespace(self.namespace.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = DdocConfig::default();
        assert_eq!(config.work_dir, PathBuf::from("./tmp"));
        assert_eq!(config.base64_line_width, 64);
        assert_eq!(config.namespace, "http://www.sk.ee/DigiDoc/v1.3.0#");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ddoc.toml");
        fs::write(&path, "work_dir = \"/var/lib/ddoc\"\n").unwrap();

        let config = DdocConfig::load(&path).unwrap();
        assert_eq!(config.work_dir, PathBuf::from("/var/lib/ddoc"));
        assert_eq!(config.base64_line_width, 64);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ddoc.toml");
        fs::write(&path, "base64_line_width = 0\n").unwrap();
        assert!(matches!(DdocConfig::load(&path), Err(Error::Config(_))));

        fs::write(&path, "work_dir = \"\"\n").unwrap();
        assert!(matches!(DdocConfig::load(&path), Err(Error::Config(_))));

        fs::write(&path, "base64_line_width = \"wide\"\n").unwrap();
        assert!(matches!(DdocConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(matches!(
            DdocConfig::load_or_default(Some(&missing)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DdocConfig {
            base64_line_width: 76,
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        let back: DdocConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_transform_context_uses_settings() {
        let tmp = tempdir().unwrap();
        let config = DdocConfig {
            work_dir: tmp.path().join("work"),
            base64_line_width: 16,
            namespace: "urn:test".into(),
        };
        let ctx = config.transform_context().unwrap();
        assert_eq!(ctx.base64_line_width, 16);
        assert_eq!(ctx.namespace, "urn:test");
        assert!(tmp.path().join("work").is_dir());
    }
}
