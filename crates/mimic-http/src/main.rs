//! Mimic CLI: start mock servers from a JSON config file.
//!
//! Usage:
//!   mimic --config mocks.json [--host 127.0.0.1]

use anyhow::Context;
use clap::Parser;
use mimic_http::config::load_entries;
use mimic_http::console::{help_text, rules_table, DIM, RED, RESET, YELLOW_BG};
use mimic_http::server::{ServerRegistry, DEFAULT_HOST};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Mimic - mock HTTP servers from a config file
#[derive(Parser, Debug)]
#[command(name = "mimic")]
#[command(author, version, about, long_about = None, disable_help_flag = true)]
struct Args {
    /// Path to the JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address every listener binds to
    #[arg(long, env = "MIMIC_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Show help and the config field reference
    #[arg(short, long)]
    help: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    if args.help {
        println!("{}", help_text());
        return ExitCode::SUCCESS;
    }

    let Some(config_path) = args.config else {
        eprintln!("{RED}No config file passed{RESET}\n");
        println!("{}", help_text());
        return ExitCode::FAILURE;
    };

    match run(&config_path, &args.host).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{RED}{e:#}{RESET}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config_path: &Path, host: &str) -> anyhow::Result<()> {
    println!("{DIM}Using Config File:{RESET} {}", config_path.display());
    let entries = load_entries(config_path)?;

    println!("{YELLOW_BG}Starting Multiple Servers{RESET}");
    let registry = ServerRegistry::with_host(host);
    registry.start(entries).await?;

    for port in registry.ports() {
        if let Some(group) = registry.group(port) {
            print!("{}", rules_table(group.rules()).render());
        }
    }

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    registry.stop_all().await;
    Ok(())
}
