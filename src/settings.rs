use anyhow::{Context, Result};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Game settings, layered as defaults, then an optional `boggle.toml`,
/// then `BOGGLE_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Word-per-line dictionary file
    pub dictionary_path: String,
    /// Pause after lighting each cube of a found word
    pub highlight_delay_ms: u64,
    pub show_instructions: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::defaults()?
            .add_source(File::with_name("boggle").required(false))
            .add_source(Environment::with_prefix("BOGGLE"))
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("dictionary_path", "EnglishWords.dat")?
            .set_default("highlight_delay_ms", 100_i64)?
            .set_default("show_instructions", true)?;

        Ok(builder)
    }

    pub fn highlight_delay(&self) -> Duration {
        Duration::from_millis(self.highlight_delay_ms)
    }
}
