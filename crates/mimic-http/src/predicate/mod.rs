//! Request matching primitives.
//!
//! - `structural_eq` - deep equality with containment semantics for objects
//! - `request` - request view, query parsing and effective-input computation

mod request;
mod structural_eq;

pub use request::{is_falsy, parse_query_string, strip_query, IncomingRequest};
pub use structural_eq::structural_eq;
