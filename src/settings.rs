use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::convert::Pandoc;
use crate::model::Engine;

/// Runtime settings: defaults, then `doctitle.toml` if present, then
/// `DOCTITLE_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Converter executable.
    pub pandoc_bin: String,
    /// Engine used when the command line does not pick one.
    pub engine: Engine,
    /// Value of pandoc's `--wrap` for markdown output.
    pub markdown_wrap: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("doctitle").required(false))
            .add_source(Environment::with_prefix("DOCTITLE"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("pandoc_bin", "pandoc")?
            .set_default("engine", "docx")?
            .set_default("markdown_wrap", "none")
    }

    pub fn pandoc(&self) -> Pandoc {
        Pandoc::new(&self.pandoc_bin, &self.markdown_wrap)
    }
}
