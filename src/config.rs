//! Configuration module
//!
//! All tunables resolve from environment variables with sensible defaults.
//! `PORT` is honored first so PaaS deploys work unmodified; `TAPROOM_*`
//! variables cover local development.

use std::net::SocketAddr;
use tracing::warn;

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Seed the store with a sample inventory at startup
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            seed: false,
        }
    }
}

impl ServerConfig {
    /// Resolve configuration from the environment.
    ///
    /// Invalid numeric values fall back to the default with a warning
    /// rather than refusing to start.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("TAPROOM_HOST").unwrap_or(defaults.host);

        let port = std::env::var("PORT")
            .or_else(|_| std::env::var("TAPROOM_PORT"))
            .ok()
            .and_then(|raw| match raw.parse::<u16>() {
                Ok(p) => Some(p),
                Err(_) => {
                    warn!("Invalid port value {:?}, using default {}", raw, defaults.port);
                    None
                }
            })
            .unwrap_or(defaults.port);

        let seed = std::env::var("TAPROOM_SEED")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed);

        Self { host, port, seed }
    }

    /// Bind address for the listener.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(!config.seed);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            seed: false,
        };
        let addr = config.socket_addr().expect("should parse");
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_bad_host_fails_to_parse() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 3000,
            seed: false,
        };
        assert!(config.socket_addr().is_err());
    }
}
