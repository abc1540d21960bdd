//! Type definitions for validated endpoint rules and server errors.

use crate::config::{MethodSet, RuleError};
use bytes::Bytes;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Validated, immutable form of one configuration record.
#[derive(Debug, Clone)]
pub struct EndpointRule {
    /// Diagnostic label; not required to be unique.
    pub name: String,
    pub methods: MethodSet,
    pub path: String,
    pub port: u16,
    pub description: Option<String>,
    /// `None` accepts any request payload.
    pub expected_input: Option<Value>,
    pub response: ResponseSpec,
}

/// Canned response materialized at startup.
#[derive(Debug, Clone, Default)]
pub struct ResponseSpec {
    pub body: Bytes,
    /// Configured headers; `None` falls back to `Content-Type: text/plain`.
    pub headers: Option<Vec<(String, String)>>,
    /// File the body was loaded from, if any.
    pub file_path: Option<PathBuf>,
}

impl ResponseSpec {
    /// Render a configured JSON value into a response body.
    ///
    /// Strings are served verbatim; other values as compact JSON.
    pub fn body_from_value(value: Option<&Value>) -> Bytes {
        match value {
            None | Some(Value::Null) => Bytes::new(),
            Some(Value::String(s)) => Bytes::from(s.clone()),
            Some(other) => Bytes::from(other.to_string()),
        }
    }
}

/// Errors raised while starting or stopping port groups.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("Port {0} is already in use by this registry")]
    DuplicatePort(u16),
    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("Server not found on port {0}")]
    NotFound(u16),
}
