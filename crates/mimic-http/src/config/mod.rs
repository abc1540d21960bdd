//! Endpoint configuration: raw records, method parsing, and file loading.

mod entry;
mod error;
mod method;

use std::path::Path;

pub use entry::{EndpointConfig, InputConfig, MethodSpec, OutputConfig};
pub use error::{ConfigError, LoadError, RuleError};
pub use method::{HttpMethod, MethodSet, ALLOWED_METHODS};

use entry::ConfigDocument;

/// Read a JSON config file into raw endpoint records.
///
/// The document may be an array of records or one bare record.
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<EndpointConfig>, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entries(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode config text into raw endpoint records.
pub fn parse_entries(contents: &str) -> Result<Vec<EndpointConfig>, serde_json::Error> {
    let document: ConfigDocument = serde_json::from_str(contents)?;
    Ok(document.into_entries())
}
