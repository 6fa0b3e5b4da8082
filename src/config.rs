//! Process configuration for the HTTP wrapper (spec §6 "Process
//! configuration (collaborator)"). The core allocator crate reads none of
//! this; it is consumed only by `main.rs`/`api.rs`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Shared secret callers must present in the `X-API-KEY` header.
    pub secret_key: String,
    /// Allowed CORS origin for the frontend.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_frontend_url() -> String {
    "*".to_string()
}

fn default_port() -> u16 {
    7860
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("frontend_url", default_frontend_url())?
            .set_default("port", default_port() as i64)?
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        config.try_deserialize()
    }
}
