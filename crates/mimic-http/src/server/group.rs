//! A running listener and the rules bound to its port.

use super::handler::handle_request;
use super::types::{EndpointRule, ServerError};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// All rules sharing one port, served by one listener.
pub struct PortGroup {
    port: u16,
    local_addr: SocketAddr,
    rules: Arc<[EndpointRule]>,
    shutdown_tx: broadcast::Sender<()>,
    /// Accept loop; taken by the first `stop` call.
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PortGroup {
    /// Bind `host:port` and start serving `rules` in configuration order.
    pub async fn bind(
        host: &str,
        port: u16,
        rules: Vec<EndpointRule>,
    ) -> Result<Self, ServerError> {
        debug_assert!(rules.iter().all(|r| r.port == port));

        let listener = TcpListener::bind((host, port))
            .await
            .map_err(|source| ServerError::Bind { port, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { port, source })?;
        info!("Server bound to {}:{} ({} rules)", host, port, rules.len());

        let rules: Arc<[EndpointRule]> = rules.into();
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let served_rules = Arc::clone(&rules);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, addr)) => {
                                let rules = Arc::clone(&served_rules);
                                tokio::spawn(async move {
                                    let io = TokioIo::new(stream);
                                    let service = service_fn(move |req| {
                                        let rules = Arc::clone(&rules);
                                        async move { handle_request(req, rules, addr).await }
                                    });
                                    if let Err(e) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection error on port {}: {}", port, e);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Accept error on port {}: {}", port, e);
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!("Server closed on port {}", port);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            port,
            local_addr,
            rules,
            shutdown_tx,
            task: Mutex::new(Some(task)),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Rules in matching order.
    pub fn rules(&self) -> &[EndpointRule] {
        &self.rules
    }

    /// Stop accepting connections and release the port.
    ///
    /// Returns once the listener is dropped. Later calls return immediately.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(());
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                error!("Accept loop for port {} ended abnormally: {}", self.port, e);
            }
        }
    }
}
