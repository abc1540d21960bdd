//! Incoming request view used for rule matching.

use bytes::Bytes;
use serde_json::{Map, Value};

/// Method, target and body of one request, detached from the transport.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: String,
    /// Request target as received, possibly with a `?query` suffix.
    pub raw_path: String,
    pub body: Bytes,
}

impl IncomingRequest {
    pub fn new(
        method: impl Into<String>,
        raw_path: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            method: method.into(),
            raw_path: raw_path.into(),
            body: body.into(),
        }
    }

    /// Path with any query component stripped.
    pub fn path(&self) -> &str {
        strip_query(&self.raw_path)
    }

    /// Query component without the leading `?`, if present.
    pub fn query(&self) -> Option<&str> {
        self.raw_path.split_once('?').map(|(_, q)| q)
    }

    /// Body parsed as JSON. Empty, malformed or falsy bodies yield an empty object.
    pub fn parsed_body(&self) -> Value {
        if self.body.is_empty() {
            return Value::Object(Map::new());
        }
        match serde_json::from_slice::<Value>(&self.body) {
            Ok(value) if !is_falsy(&value) => value,
            _ => Value::Object(Map::new()),
        }
    }

    /// Parsed body merged with query parameters; query values win on collision.
    ///
    /// A non-object body cannot carry keys, so when query parameters are present
    /// it is replaced by the query object.
    pub fn effective_input(&self) -> Value {
        let body = self.parsed_body();
        let query = parse_query_string(self.query());
        if query.is_empty() {
            return body;
        }
        match body {
            Value::Object(mut merged) => {
                merged.extend(query);
                Value::Object(merged)
            }
            _ => Value::Object(query),
        }
    }
}

/// Drop everything from the first `?` onwards.
pub fn strip_query(raw_path: &str) -> &str {
    raw_path.split_once('?').map_or(raw_path, |(path, _)| path)
}

/// Null, false, zero and the empty string.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Parse a query string into flat string pairs; later duplicates overwrite earlier ones.
///
/// Keys and values are percent-decoded; text with an invalid escape is kept as sent.
pub fn parse_query_string(query: Option<&str>) -> Map<String, Value> {
    let mut params = Map::new();
    if let Some(q) = query {
        for pair in q.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                params.insert(decode_or_raw(key), Value::String(decode_or_raw(value)));
            } else if !pair.is_empty() {
                params.insert(decode_or_raw(pair), Value::String(String::new()));
            }
        }
    }
    params
}

fn decode_or_raw(text: &str) -> String {
    urlencoding::decode(text).map_or_else(|_| text.to_string(), |decoded| decoded.into_owned())
}
