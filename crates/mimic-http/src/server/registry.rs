//! ServerRegistry - partitions rules by port and owns the listeners.

use super::group::PortGroup;
use super::rule::build_rules;
use super::types::{EndpointRule, ServerError};
use crate::config::EndpointConfig;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Owns one [`PortGroup`] per configured port.
pub struct ServerRegistry {
    host: String,
    groups: RwLock<HashMap<u16, Arc<PortGroup>>>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::with_host(DEFAULT_HOST)
    }

    /// Registry whose listeners bind to `host`.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            groups: RwLock::new(HashMap::new()),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Validate every entry, then start one listener per distinct port.
    ///
    /// Nothing is bound unless all entries validate. If a bind fails, groups
    /// started by this call are stopped before the error is returned.
    /// Returns the started ports in first-seen order.
    pub async fn start(&self, entries: Vec<EndpointConfig>) -> Result<Vec<u16>, ServerError> {
        let rules = build_rules(entries)?;
        let partitions = partition_by_port(rules);

        {
            let groups = self.groups.read();
            if let Some((port, _)) = partitions.iter().find(|(p, _)| groups.contains_key(p)) {
                return Err(ServerError::DuplicatePort(*port));
            }
        }

        let mut started: Vec<PortGroup> = Vec::with_capacity(partitions.len());
        for (port, rules) in partitions {
            match PortGroup::bind(&self.host, port, rules).await {
                Ok(group) => started.push(group),
                Err(e) => {
                    for group in started {
                        group.stop().await;
                    }
                    return Err(e);
                }
            }
        }

        let ports: Vec<u16> = started.iter().map(PortGroup::port).collect();
        let mut groups = self.groups.write();
        for group in started {
            groups.insert(group.port(), Arc::new(group));
        }
        Ok(ports)
    }

    /// Stop the group on `port` and release the port.
    pub async fn stop(&self, port: u16) -> Result<(), ServerError> {
        let group = self
            .groups
            .write()
            .remove(&port)
            .ok_or(ServerError::NotFound(port))?;
        group.stop().await;
        Ok(())
    }

    /// Stop every running group.
    pub async fn stop_all(&self) {
        let groups: Vec<Arc<PortGroup>> = self.groups.write().drain().map(|(_, g)| g).collect();
        for group in groups {
            group.stop().await;
        }
    }

    pub fn group(&self, port: u16) -> Option<Arc<PortGroup>> {
        self.groups.read().get(&port).cloned()
    }

    /// Running ports in ascending order.
    pub fn ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self.groups.read().keys().copied().collect();
        ports.sort_unstable();
        ports
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}

impl Default for ServerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Group rules by port, keeping ports in first-seen order and rules in
/// configuration order within each port.
pub fn partition_by_port(rules: Vec<EndpointRule>) -> Vec<(u16, Vec<EndpointRule>)> {
    let mut partitions: Vec<(u16, Vec<EndpointRule>)> = Vec::new();
    for rule in rules {
        match partitions.iter_mut().find(|(port, _)| *port == rule.port) {
            Some((_, group)) => group.push(rule),
            None => partitions.push((rule.port, vec![rule])),
        }
    }
    partitions
}
