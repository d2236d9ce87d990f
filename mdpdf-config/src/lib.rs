//! Configuration loader for the mdpdf filter.
//!
//! `defaults/mdpdf.default.toml` is embedded into the binary so the documented defaults
//! and runtime behavior stay in sync. Callers layer user files and single-key overrides
//! on top of it via [`Loader`] before deserializing into [`MdpdfConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdpdf_filters::transforms::{CodeListing, TypesetMeta};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdpdf.default.toml");

/// File name looked up in a project directory by [`Loader::with_project_dir`].
pub const PROJECT_CONFIG: &str = "mdpdf.toml";

/// Top-level configuration consumed by the filter.
#[derive(Debug, Clone, Deserialize)]
pub struct MdpdfConfig {
    pub filter: FilterConfig,
    pub listings: ListingsConfig,
    pub meta: MetaConfig,
}

/// Which document-level steps run.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub inject_meta: bool,
}

/// Code block to listing merging.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingsConfig {
    pub enabled: bool,
    pub raw_format: String,
    pub environment: String,
}

impl From<&ListingsConfig> for CodeListing {
    fn from(config: &ListingsConfig) -> Self {
        CodeListing::new(config.raw_format.clone(), config.environment.clone())
    }
}

/// Typesetting options written into the document metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaConfig {
    pub cjk_mainfont: String,
    pub papersize: String,
    pub geometry: String,
    pub fontsize: String,
    pub header_includes: String,
    pub raw_format: String,
}

impl From<MetaConfig> for TypesetMeta {
    fn from(config: MetaConfig) -> Self {
        TypesetMeta {
            cjk_mainfont: config.cjk_mainfont,
            papersize: config.papersize,
            geometry: config.geometry,
            fontsize: config.fontsize,
            header_includes: config.header_includes,
            raw_format: config.raw_format,
        }
    }
}

impl From<&MetaConfig> for TypesetMeta {
    fn from(config: &MetaConfig) -> Self {
        config.clone().into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    /// Layer `dir/mdpdf.toml` if the directory has one.
    pub fn with_project_dir(self, dir: impl AsRef<Path>) -> Self {
        self.with_optional_file(dir.as_ref().join(PROJECT_CONFIG))
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path)
            .format(FileFormat::Toml)
            .required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `meta.papersize = "letter"`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdpdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdpdfConfig, ConfigError> {
    Loader::new().build()
}
