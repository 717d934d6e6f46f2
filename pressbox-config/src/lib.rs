//! Layered configuration for pressbox.
//!
//! `defaults/pressbox.default.toml` is embedded into every binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer site-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`PressboxConfig`], then convert
//! each section into the option type the library expects.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use pressbox::read_time::ContentType;
use pressbox::{KeywordOptions, ReadTimeOptions, SeoOptions, SerializerOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/pressbox.default.toml");

/// Top-level configuration consumed by pressbox applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PressboxConfig {
    pub render: RenderConfig,
    pub read_time: ReadTimeConfig,
    pub excerpt: ExcerptConfig,
    pub seo: SeoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadTimeConfig {
    pub words_per_minute: u32,
    pub content_type: ContentType,
    pub include_media: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExcerptConfig {
    pub max_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeoConfig {
    pub description_length: usize,
    pub max_keywords: usize,
    pub min_keyword_length: usize,
}

impl From<&RenderConfig> for SerializerOptions {
    fn from(config: &RenderConfig) -> Self {
        SerializerOptions {
            max_depth: config.max_depth,
        }
    }
}

impl From<&ReadTimeConfig> for ReadTimeOptions {
    fn from(config: &ReadTimeConfig) -> Self {
        ReadTimeOptions {
            words_per_minute: config.words_per_minute,
            content_type: config.content_type,
            include_media: config.include_media,
        }
    }
}

impl From<&SeoConfig> for KeywordOptions {
    fn from(config: &SeoConfig) -> Self {
        KeywordOptions {
            max_keywords: config.max_keywords,
            min_length: config.min_keyword_length,
        }
    }
}

impl PressboxConfig {
    pub fn serializer_options(&self) -> SerializerOptions {
        (&self.render).into()
    }

    pub fn read_time_options(&self) -> ReadTimeOptions {
        (&self.read_time).into()
    }

    pub fn keyword_options(&self) -> KeywordOptions {
        (&self.seo).into()
    }

    /// SEO options draw on both the `[seo]` and `[read_time]` sections.
    pub fn seo_options(&self) -> SeoOptions {
        SeoOptions {
            description_length: self.seo.description_length,
            keywords: self.keyword_options(),
            read_time: self.read_time_options(),
        }
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
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (CLI flags end up here).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PressboxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PressboxConfig, ConfigError> {
    Loader::new().build()
}
