//! Application settings loaded via OrthoConfig.
//!
//! Values come from `COMMUNITIES_*` environment variables, configuration
//! files and command-line flags. The token signing secret is loaded
//! separately; see [`token_secret_from_env`](crate::outbound::security::token_secret_from_env).

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMMUNITIES")]
pub struct AppSettings {
    /// `host:port` to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl AppSettings {
    /// Configured listen address, falling back to `0.0.0.0:3000`.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Configured pool size.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }
}
