//! HTTP glue between hyper connections and the dispatcher.

use super::dispatch::dispatch;
use super::types::EndpointRule;
use crate::predicate::IncomingRequest;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Handle a request arriving on a port group's listener.
pub async fn handle_request(
    req: Request<Incoming>,
    rules: Arc<[EndpointRule]>,
    client_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let raw_path = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), |pq| pq.as_str().to_string());

    // A body that fails mid-stream is treated like an absent one.
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            debug!("Failed to read body from {}: {}", client_addr, e);
            Bytes::new()
        }
    };

    let request = IncomingRequest::new(method, raw_path, body);
    Ok(dispatch(&request, &rules).into_response())
}
