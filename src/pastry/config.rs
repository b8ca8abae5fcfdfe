use crate::error::{PastryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_HTTP_PORT: u16 = 9180;
pub const DEFAULT_WRITE_PORT: u16 = 9181;
pub const DEFAULT_READ_PORT: u16 = 9182;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 100;
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Configuration for pastry, stored in `<config dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PastryConfig {
    /// Address all three listeners bind to
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Port of the browser interface
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Port that stores whatever is sent to it
    #[serde(default = "default_write_port")]
    pub write_port: u16,

    /// Port that answers get/list/grep/drop
    #[serde(default = "default_read_port")]
    pub read_port: u16,

    /// How long the read port waits for a command, and the idle gap that ends
    /// a payload on either port
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Largest payload read from a single connection
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,

    /// Snapshot file; defaults to `pastes.json` in the cache directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_file: Option<PathBuf>,
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

fn default_write_port() -> u16 {
    DEFAULT_WRITE_PORT
}

fn default_read_port() -> u16 {
    DEFAULT_READ_PORT
}

fn default_read_timeout_ms() -> u64 {
    DEFAULT_READ_TIMEOUT_MS
}

fn default_max_payload_bytes() -> usize {
    DEFAULT_MAX_PAYLOAD_BYTES
}

impl Default for PastryConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            http_port: DEFAULT_HTTP_PORT,
            write_port: DEFAULT_WRITE_PORT,
            read_port: DEFAULT_READ_PORT,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            cache_file: None,
        }
    }
}

impl PastryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PastryError::Io)?;
        let config: PastryConfig =
            serde_json::from_str(&content).map_err(PastryError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PastryError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PastryError::Serialization)?;
        fs::write(config_path, content).map_err(PastryError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_payload_bytes == 0 {
            return Err(PastryError::Config(
                "max_payload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.read_timeout_ms == 0 {
            return Err(PastryError::Config(
                "read_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.http_port)
    }

    pub fn write_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.write_port)
    }

    pub fn read_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.read_port)
    }

    /// The snapshot file, falling back to `pastes.json` inside `cache_dir`.
    pub fn cache_file_in(&self, cache_dir: &Path) -> PathBuf {
        self.cache_file
            .clone()
            .unwrap_or_else(|| cache_dir.join(crate::store::fs::SNAPSHOT_FILENAME))
    }
}
