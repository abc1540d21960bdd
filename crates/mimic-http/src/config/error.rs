//! Errors raised while loading and validating endpoint configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Validation failure for a single configuration record.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Port is required")]
    MissingPort,
    /// `None` when the method field is absent or empty.
    #[error("{}", invalid_method_message(.0.as_deref()))]
    InvalidMethod(Option<String>),
    #[error("File not found at path: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Output configuration is required")]
    MissingOutput,
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn invalid_method_message(method: Option<&str>) -> String {
    match method {
        Some(m) => format!(
            "Invalid method '{m}'. Allowed methods are {}",
            super::method::ALLOWED_METHODS.join(", ")
        ),
        None => "Method is required".to_string(),
    }
}

/// A [`ConfigError`] tagged with the name of the record that produced it.
#[derive(Error, Debug)]
#[error("{source} for server {name}")]
pub struct RuleError {
    pub name: String,
    #[source]
    pub source: ConfigError,
}

/// Failure to read or decode the configuration file itself.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
