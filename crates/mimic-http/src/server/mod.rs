//! Mock servers: rule validation, request dispatch and listener lifecycle.
//!
//! ## Module Structure
//!
//! - `types`: rule, response and error types
//! - `rule`: validation of raw records into rules
//! - `dispatch`: first-match rule selection and response rendering
//! - `handler`: hyper request handling for a port group
//! - `group`: one listener and its rules
//! - `registry`: grouping by port and lifecycle of all listeners

mod dispatch;
mod group;
mod handler;
mod registry;
mod rule;
mod types;

#[cfg(test)]
mod tests;

pub use dispatch::{
    dispatch, find_match, MatchOutcome, MockResponse, INPUT_MISMATCH_BODY, NO_ROUTE_BODY,
    RESPONSE_BUILD_ERROR_BODY,
};
pub use group::PortGroup;
pub use handler::handle_request;
pub use registry::{partition_by_port, ServerRegistry, DEFAULT_HOST};
pub use rule::{build_rule, build_rules};
pub use types::{EndpointRule, ResponseSpec, ServerError};
