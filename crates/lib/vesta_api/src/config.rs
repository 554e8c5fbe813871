//! API server configuration.

/// Host the server binds to when nothing else is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the server binds to when nothing else is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the API server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ApiConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            bind_addr: format!("{host}:{port}"),
        }
    }
}
