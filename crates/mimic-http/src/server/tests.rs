//! Tests for port grouping and listener lifecycle.

use super::*;
use crate::config::{ConfigError, EndpointConfig, MethodSpec, OutputConfig};
use serde_json::json;
use std::net::TcpListener as StdListener;
use std::sync::atomic::{AtomicU16, Ordering};

fn entry(name: &str, port: u16, path: &str) -> EndpointConfig {
    EndpointConfig {
        name: name.to_string(),
        method: Some(MethodSpec::One("GET".to_string())),
        port: Some(port),
        path: path.to_string(),
        output: Some(OutputConfig {
            response: Some(json!(name)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Distinct high port per call.
fn free_port() -> u16 {
    static PORT_COUNTER: AtomicU16 = AtomicU16::new(18400);
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

fn port_is_free(port: u16) -> bool {
    StdListener::bind(("127.0.0.1", port)).is_ok()
}

async fn get(port: u16, path: &str) -> (u16, String) {
    let response = reqwest::get(format!("http://127.0.0.1:{port}{path}"))
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

#[test]
fn test_partition_preserves_order() {
    let rules = build_rules(vec![
        entry("a1", 8082, "/a1"),
        entry("b1", 8081, "/b1"),
        entry("a2", 8082, "/a2"),
        entry("b2", 8081, "/b2"),
        entry("c1", 8083, "/c1"),
    ])
    .unwrap();

    let partitions = partition_by_port(rules);
    let summary: Vec<(u16, Vec<&str>)> = partitions
        .iter()
        .map(|(port, rules)| (*port, rules.iter().map(|r| r.name.as_str()).collect()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (8082, vec!["a1", "a2"]),
            (8081, vec!["b1", "b2"]),
            (8083, vec!["c1"]),
        ]
    );
}

#[tokio::test]
async fn test_each_port_serves_only_its_rules() {
    let (p1, p2) = (free_port(), free_port());
    let registry = ServerRegistry::with_host("127.0.0.1");
    let ports = registry
        .start(vec![
            entry("one", p1, "/one"),
            entry("two", p2, "/two"),
            entry("one-more", p1, "/one-more"),
        ])
        .await
        .unwrap();

    assert_eq!(ports, vec![p1, p2]);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.group(p1).unwrap().rules().len(), 2);
    assert_eq!(registry.group(p2).unwrap().rules().len(), 1);

    assert_eq!(get(p1, "/one").await, (200, "one".to_string()));
    assert_eq!(get(p1, "/one-more").await, (200, "one-more".to_string()));
    assert_eq!(get(p2, "/two").await, (200, "two".to_string()));
    assert_eq!(get(p1, "/two").await, (404, NO_ROUTE_BODY.to_string()));
    assert_eq!(get(p2, "/one").await, (404, NO_ROUTE_BODY.to_string()));

    registry.stop_all().await;
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_missing_file_fails_before_any_listener_opens() {
    let (p1, p2) = (free_port(), free_port());
    let mut broken = entry("broken", p2, "/broken");
    broken.output = Some(OutputConfig {
        file_path: Some("/no/such/body.json".into()),
        ..Default::default()
    });

    let registry = ServerRegistry::with_host("127.0.0.1");
    let err = registry
        .start(vec![entry("fine", p1, "/fine"), broken])
        .await
        .unwrap_err();

    match err {
        ServerError::Rule(rule_err) => {
            assert_eq!(rule_err.name, "broken");
            assert!(matches!(rule_err.source, ConfigError::FileNotFound(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(registry.is_empty());
    assert!(port_is_free(p1));
}

#[tokio::test]
async fn test_stop_releases_port() {
    let port = free_port();
    let registry = ServerRegistry::with_host("127.0.0.1");
    registry.start(vec![entry("s", port, "/s")]).await.unwrap();
    assert!(!port_is_free(port));

    registry.stop(port).await.unwrap();
    assert!(registry.ports().is_empty());
    assert!(port_is_free(port));

    assert!(matches!(
        registry.stop(port).await,
        Err(ServerError::NotFound(p)) if p == port
    ));
}

#[tokio::test]
async fn test_stop_releases_port_while_group_is_shared() {
    let port = free_port();
    let registry = ServerRegistry::with_host("127.0.0.1");
    registry.start(vec![entry("held", port, "/held")]).await.unwrap();

    let held = registry.group(port).unwrap();
    registry.stop(port).await.unwrap();
    assert!(port_is_free(port));

    // Stopping the shared handle again is a no-op.
    held.stop().await;
    assert_eq!(held.port(), port);
}

#[tokio::test]
async fn test_port_already_running_is_rejected() {
    let port = free_port();
    let registry = ServerRegistry::with_host("127.0.0.1");
    registry.start(vec![entry("first", port, "/")]).await.unwrap();

    let err = registry
        .start(vec![entry("again", port, "/")])
        .await
        .unwrap_err();
    assert!(matches!(err, ServerError::DuplicatePort(p) if p == port));

    registry.stop_all().await;
}

#[tokio::test]
async fn test_bind_failure_stops_started_groups() {
    let p1 = free_port();
    let occupied = StdListener::bind(("127.0.0.1", 0)).unwrap();
    let p2 = occupied.local_addr().unwrap().port();

    let registry = ServerRegistry::with_host("127.0.0.1");
    let err = registry
        .start(vec![entry("ok", p1, "/ok"), entry("taken", p2, "/taken")])
        .await
        .unwrap_err();

    assert!(matches!(err, ServerError::Bind { port, .. } if port == p2));
    assert!(registry.is_empty());
    assert!(port_is_free(p1));
}
