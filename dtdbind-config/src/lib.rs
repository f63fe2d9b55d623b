//! Layered configuration for dtdbind
//!
//! Three layers, lowest first:
//!
//! 1. `defaults/dtdbind.default.toml`, compiled in, so every key always has a value.
//! 2. An optional user TOML file (`--config`), which only needs the keys it changes.
//! 3. Command-line flags such as `--package` and `--target`.
//!
//! [`Loader`] stacks the layers and [`DtdbindConfig::generate_options`] turns the result
//! into the options the generator takes.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use dtdbind_codegen::{ChoicePolicy, GenerateOptions};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/dtdbind.default.toml");

/// Top-level configuration consumed by dtdbind.
#[derive(Debug, Clone, Deserialize)]
pub struct DtdbindConfig {
    pub output: OutputConfig,
    pub generation: GenerationConfig,
}

/// Where generated code goes and what it looks like from the outside.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub package: String,
    pub target: String,
}

/// Knobs of the content-model compiler and emitters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerationConfig {
    pub choice_cardinality: ChoicePolicy,
    pub doc_comments: bool,
}

impl DtdbindConfig {
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            package: self.output.package.clone(),
            target: self.output.target.clone(),
            choice_policy: self.generation.choice_cardinality,
            doc_comments: self.generation.doc_comments,
        }
    }
}

/// Builder for the three configuration layers.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Put a user TOML file over the defaults. The file must exist; keys it omits keep
    /// their default values.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key (`output.target`) above every file layer. Used for flags.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers. Fails on unreadable files and on values that do not fit
    /// [`DtdbindConfig`], such as an unknown `choice-cardinality`.
    pub fn build(self) -> Result<DtdbindConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration with no user file and no flags.
pub fn load_defaults() -> Result<DtdbindConfig, ConfigError> {
    Loader::new().build()
}
