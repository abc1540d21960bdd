//! Construction of [`EndpointRule`]s from raw configuration records.

use super::types::{EndpointRule, ResponseSpec};
use crate::config::{ConfigError, EndpointConfig, MethodSet, RuleError};
use crate::predicate::is_falsy;
use bytes::Bytes;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Validate one record into a rule, tagging any failure with the record's name.
pub fn build_rule(entry: EndpointConfig) -> Result<EndpointRule, RuleError> {
    let name = entry.name.clone();
    validate_entry(entry).map_err(|source| RuleError { name, source })
}

/// Validate every record, stopping at the first failure.
pub fn build_rules(
    entries: impl IntoIterator<Item = EndpointConfig>,
) -> Result<Vec<EndpointRule>, RuleError> {
    entries.into_iter().map(build_rule).collect()
}

fn validate_entry(entry: EndpointConfig) -> Result<EndpointRule, ConfigError> {
    let methods = MethodSet::normalize(entry.method.as_ref())?;

    let output = entry.output.ok_or(ConfigError::MissingOutput)?;
    let body = match &output.file_path {
        Some(path) => Bytes::from(read_existing(path)?),
        None => ResponseSpec::body_from_value(output.response.as_ref()),
    };
    let headers = output.headers.map(|h| h.into_iter().collect());

    let expected_input = match &entry.input.file_path {
        Some(path) => Some(parse_input_file(read_existing(path)?)),
        None => entry.input.request,
    }
    // Falsy expectations accept any request.
    .filter(|value| !is_falsy(value));

    let port = entry.port.filter(|p| *p != 0).ok_or(ConfigError::MissingPort)?;

    debug!("Validated rule '{}' on port {}", entry.name, port);
    Ok(EndpointRule {
        name: entry.name,
        methods,
        path: entry.path,
        port,
        description: entry.description,
        expected_input,
        response: ResponseSpec {
            body,
            headers,
            file_path: output.file_path,
        },
    })
}

fn read_existing(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Input files hold JSON; anything else is compared as a plain string.
fn parse_input_file(contents: String) -> Value {
    serde_json::from_str(&contents).unwrap_or(Value::String(contents))
}
