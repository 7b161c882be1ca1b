//! Relay configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`):
//!
//! | key                | default        |
//! |--------------------|----------------|
//! | `LISTEN_ADDR`      | `0.0.0.0:8000` |
//! | `CLIENT_PAGE_PATH` | `map.html`     |
//! | `OUTBOUND_BUFFER`  | `64`           |
//! | `LOG_FORMAT`       | `text`         |

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::RelayError;

/// Default per-member outbound queue capacity.
pub const DEFAULT_OUTBOUND_BUFFER: usize = 64;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// File served as the client page at `GET /`.
    pub client_page_path: PathBuf,

    /// Capacity of each member's outbound queue. A member whose queue is
    /// full misses broadcasts until it drains.
    pub outbound_buffer: usize,

    /// Format of emitted log lines.
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            client_page_path: PathBuf::from("map.html"),
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            log_format: LogFormat::Text,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] if `LISTEN_ADDR` is set but cannot be
    /// parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RelayError> {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|e| RelayError::Config(format!("LISTEN_ADDR={raw}: {e}")))?,
            None => defaults.listen_addr,
        };

        let client_page_path = lookup("CLIENT_PAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.client_page_path);

        let outbound_buffer = lookup("OUTBOUND_BUFFER")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.outbound_buffer)
            .max(1);

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            client_page_path,
            outbound_buffer,
            log_format,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<RelayConfig, RelayError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RelayConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let Ok(config) = load(&[]) else {
            panic!("defaults should load");
        };
        assert_eq!(config.listen_addr.port(), 8000);
        assert_eq!(config.client_page_path, PathBuf::from("map.html"));
        assert_eq!(config.outbound_buffer, DEFAULT_OUTBOUND_BUFFER);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_are_applied() {
        let Ok(config) = load(&[
            ("LISTEN_ADDR", "127.0.0.1:9100"),
            ("CLIENT_PAGE_PATH", "/srv/page.html"),
            ("OUTBOUND_BUFFER", "8"),
            ("LOG_FORMAT", "json"),
        ]) else {
            panic!("overrides should load");
        };
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9100");
        assert_eq!(config.client_page_path, PathBuf::from("/srv/page.html"));
        assert_eq!(config.outbound_buffer, 8);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_listen_addr_is_an_error() {
        assert!(matches!(
            load(&[("LISTEN_ADDR", "not-an-addr")]),
            Err(RelayError::Config(_))
        ));
    }

    #[test]
    fn outbound_buffer_has_floor_of_one() {
        let Ok(config) = load(&[("OUTBOUND_BUFFER", "0")]) else {
            panic!("should load");
        };
        assert_eq!(config.outbound_buffer, 1);

        let Ok(config) = load(&[("OUTBOUND_BUFFER", "lots")]) else {
            panic!("should load");
        };
        assert_eq!(config.outbound_buffer, DEFAULT_OUTBOUND_BUFFER);
    }
}
