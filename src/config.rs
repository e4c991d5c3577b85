//! Server settings, layered from defaults and environment variables.

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

impl Settings {
    /// Load settings with the following priority (highest last):
    /// 1. Built-in defaults (`127.0.0.1:8765`)
    /// 2. Environment variables, e.g. `TICTACTOE__SERVER__PORT=9000`
    pub fn load() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(
                Environment::with_prefix("TICTACTOE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8765)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
