//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the picsync server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Maximum connections handled concurrently; further connections are
    /// dropped at admission.
    pub max_connections: usize,
    /// Validity window of signed image download URLs.
    pub signed_url_ttl: Duration,
}

impl ServerConfig {
    /// Creates a configuration with default limits.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            max_connections: 1000,
            signed_url_ttl: Duration::from_secs(60 * 60),
        }
    }

    /// Sets the concurrent-connection limit.
    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the signed download URL validity window.
    pub fn with_signed_url_ttl(mut self, ttl: Duration) -> Self {
        self.signed_url_ttl = ttl;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 20200)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 20200);
        assert_eq!(config.max_connections, 1000);
    }

    #[test]
    fn config_builder() {
        let config = ServerConfig::new("0.0.0.0:9000".parse().unwrap())
            .with_max_connections(16)
            .with_signed_url_ttl(Duration::from_secs(120));

        assert_eq!(config.max_connections, 16);
        assert_eq!(config.signed_url_ttl, Duration::from_secs(120));
    }
}
