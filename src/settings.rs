//! Session settings from a config file and the environment.
//!
//! Looks for an optional `slated.*` file (toml/json/yaml, whatever the
//! config crate recognizes) in the working directory and then applies
//! `SLATED_*` environment overrides, e.g. `SLATED_DATABASE=cars.db`.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{Result, SlatedError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Backing store filename; absent means an in-memory store.
    pub database: Option<String>,
    /// How long the engine may wait on a locked store before giving up.
    pub busy_timeout_ms: Option<u64>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Config::builder()
            .add_source(File::with_name("slated").required(false))
            .add_source(Environment::with_prefix("SLATED"))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| SlatedError::Config(e.to_string()))
    }
}
