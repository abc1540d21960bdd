//! Rule selection and response rendering for one request.

use super::types::EndpointRule;
use crate::predicate::{structural_eq, IncomingRequest};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::{debug, warn};

pub const INPUT_MISMATCH_BODY: &str = "Not Found";
pub const NO_ROUTE_BODY: &str = "No matching configuration found";
pub const RESPONSE_BUILD_ERROR_BODY: &str = "Internal Server Error: Invalid output configuration";

const DEFAULT_HEADERS: [(&str, &str); 1] = [("Content-Type", "text/plain")];

/// Outcome of matching one request against a rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Method, path and input matched the rule at this index.
    Matched(usize),
    /// Method and path matched the rule at this index but the input did not.
    InputMismatch(usize),
    NoRoute,
}

/// Transport-independent response produced by [`dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl MockResponse {
    fn plain(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            headers: default_headers(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    fn from_rule(rule: &EndpointRule) -> Self {
        Self {
            status: StatusCode::OK,
            headers: rule
                .response
                .headers
                .clone()
                .unwrap_or_else(default_headers),
            body: rule.response.body.clone(),
        }
    }

    /// Convert into a hyper response.
    ///
    /// Headers that cannot be encoded turn the reply into a plain-text 500.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut builder = Response::builder().status(self.status);
        for (key, value) in &self.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder.body(Full::new(self.body)).unwrap_or_else(|e| {
            warn!("Failed to build response: {}", e);
            let mut response = Response::new(Full::new(Bytes::from_static(
                RESPONSE_BUILD_ERROR_BODY.as_bytes(),
            )));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response.headers_mut().insert(
                hyper::header::CONTENT_TYPE,
                hyper::header::HeaderValue::from_static("text/plain"),
            );
            response
        })
    }
}

fn default_headers() -> Vec<(String, String)> {
    DEFAULT_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Find the rule that applies to a request.
///
/// The first rule whose method set and path match decides the outcome; a
/// payload mismatch on that rule does not fall through to later rules.
pub fn find_match(request: &IncomingRequest, rules: &[EndpointRule]) -> MatchOutcome {
    let path = request.path();
    let Some((index, rule)) = rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.methods.contains_token(&request.method) && rule.path == path)
    else {
        return MatchOutcome::NoRoute;
    };

    debug!("Matched config: {}", rule.name);
    match &rule.expected_input {
        None => MatchOutcome::Matched(index),
        Some(expected) => {
            let input = request.effective_input();
            if structural_eq(&input, expected) {
                MatchOutcome::Matched(index)
            } else {
                MatchOutcome::InputMismatch(index)
            }
        }
    }
}

/// Produce the response for a request against the rules of one port.
pub fn dispatch(request: &IncomingRequest, rules: &[EndpointRule]) -> MockResponse {
    match find_match(request, rules) {
        MatchOutcome::Matched(index) => {
            debug!("Input matched for {}", rules[index].name);
            MockResponse::from_rule(&rules[index])
        }
        MatchOutcome::InputMismatch(index) => {
            warn!(
                "Input not matched for {} {} ({})",
                request.method,
                request.path(),
                rules[index].name
            );
            MockResponse::plain(StatusCode::NOT_FOUND, INPUT_MISMATCH_BODY)
        }
        MatchOutcome::NoRoute => {
            debug!("No rule for {} {}", request.method, request.raw_path);
            MockResponse::plain(StatusCode::NOT_FOUND, NO_ROUTE_BODY)
        }
    }
}
