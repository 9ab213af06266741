//! HTTP server configuration object and helpers.

use backend::outbound::persistence::DbPool;
use backend::outbound::security::TokenSecret;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) token_secret: TokenSecret,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration listening on `bind_addr` and signing tokens
    /// with `token_secret`.
    #[must_use]
    pub fn new(bind_addr: impl Into<String>, token_secret: TokenSecret) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            token_secret,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one the server keeps all state in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
