//! Mimic: configuration-driven mock HTTP server.
//!
//! A config file lists endpoint records (method, path, expected input, canned
//! output, port). Records are validated into rules, grouped by port, and each
//! port gets a listener that answers with the first rule whose method and path
//! match the request.
//!
//! ```no_run
//! use mimic_http::config::load_entries;
//! use mimic_http::server::ServerRegistry;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let entries = load_entries("mocks.json")?;
//! let registry = ServerRegistry::new();
//! let ports = registry.start(entries).await?;
//! println!("listening on {ports:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;
pub mod predicate;
pub mod server;
