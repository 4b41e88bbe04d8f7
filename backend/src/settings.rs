//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI arguments over `ROSTER_*` environment variables over an
//! optional configuration file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::info;

use crate::domain::{User, default_users};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Failures raised while resolving settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `host:port` did not form a socket address.
    #[error("invalid bind address {addr}: {source}")]
    BindAddress {
        /// The rejected address.
        addr: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The seed file was not a JSON array of users.
    #[error("invalid seed file {path}: {source}")]
    SeedParse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration values controlling the listener and the initial roster.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct RosterSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Load the seed set at startup; unset means yes.
    pub seed: Option<bool>,
    /// JSON file of users replacing the default seed set.
    pub seed_path: Option<PathBuf>,
}

impl RosterSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether the store is seeded at startup, falling back to `true`.
    pub fn seed(&self) -> bool {
        self.seed.unwrap_or(true)
    }

    /// Socket address assembled from host and port.
    ///
    /// # Errors
    /// [`SettingsError::BindAddress`] when the host is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let addr = format!("{}:{}", self.host(), self.port());
        addr.parse()
            .map_err(|source| SettingsError::BindAddress { addr, source })
    }

    /// Users to place in the store at startup.
    ///
    /// Empty when seeding is disabled; the file at `seed_path` when one is
    /// configured; the built-in set otherwise.
    ///
    /// # Errors
    /// Propagates [`load_seed_file`] failures.
    pub fn initial_users(&self) -> Result<Vec<User>, SettingsError> {
        if !self.seed() {
            info!("seeding disabled; starting with an empty roster");
            return Ok(Vec::new());
        }
        match &self.seed_path {
            Some(path) => load_seed_file(path),
            None => Ok(default_users()),
        }
    }
}

/// Read a JSON array of users from `path`.
///
/// # Errors
/// [`SettingsError::SeedRead`] when the file cannot be read;
/// [`SettingsError::SeedParse`] when it is not a JSON array of users.
pub fn load_seed_file(path: &Path) -> Result<Vec<User>, SettingsError> {
    let read_error = |source| SettingsError::SeedRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    let users: Vec<User> =
        serde_json::from_slice(&payload).map_err(|source| SettingsError::SeedParse {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), count = users.len(), "loaded seed file");
    Ok(users)
}
