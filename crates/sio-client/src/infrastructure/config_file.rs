//! TOML configuration file loading.
//!
//! A missing file is not an error: the client runs on defaults until the
//! user writes one.  Anything else (permissions, malformed TOML) is reported.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ClientConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads [`ClientConfig`] from `path`, returning the defaults if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parses [`ClientConfig`] from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
