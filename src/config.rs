//! Server configuration from environment variables
//!
//! - `PORT` (default 3000)
//! - `BUZZER_BIND_ADDR` (default 0.0.0.0)
//! - `BUZZER_STATIC_DIR` (default `public`)
//! - `BUZZER_PALETTE` comma-separated display colors (default: built-in palette)
//! - `BUZZER_BROADCAST_CAPACITY` (default 100)

use crate::error::ConfigError;
use crate::types::{Color, DEFAULT_PALETTE};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub static_dir: String,
    pub palette: Vec<Color>,
    /// Per-channel buffer before slow receivers start lagging
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            static_dir: "public".to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables, falling back to defaults for anything unset
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = parse_var("BUZZER_BIND_ADDR")?.unwrap_or(defaults.bind_addr);
        let port = parse_var("PORT")?.unwrap_or(defaults.port);
        let static_dir = read_var("BUZZER_STATIC_DIR").unwrap_or(defaults.static_dir);

        let palette = match read_var("BUZZER_PALETTE") {
            Some(raw) => {
                let colors: Vec<Color> = raw
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                if colors.is_empty() {
                    return Err(ConfigError::EmptyPalette);
                }
                colors
            }
            None => defaults.palette,
        };

        let broadcast_capacity: usize = parse_var("BUZZER_BROADCAST_CAPACITY")?
            .unwrap_or(defaults.broadcast_capacity);
        if broadcast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "BUZZER_BROADCAST_CAPACITY",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            port,
            static_dir,
            palette,
            broadcast_capacity,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Trimmed value of `key`, treating empty as unset
fn read_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match read_var(key) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}
