//! Entity ACL client
//!
//! Fetches the ACL of a single entity and prints it as JSON.

use acl_client::{
    acl::fetch_with_config,
    config::{LogFormat, load_config},
};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Fetch the access control list of a user or robot
#[derive(Parser, Debug)]
#[command(name = "acl-client")]
#[command(version, about, long_about = None)]
struct Args {
    /// Entity ID (numeric user ID or robot UUID)
    entity_id: String,

    /// Path to configuration file
    #[arg(short, long, env = "ACL_CLIENT_CONFIG")]
    config: Option<String>,

    /// Identity service base URL (overrides configuration)
    #[arg(long, env = "ACL_CLIENT_HOST")]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ACL_CLIENT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print an empty ACL instead of failing when none exists
    #[arg(long)]
    empty_on_not_found: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.acl.host = host;
    }

    // Initialize logging
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.acl.host,
        entity_id = %args.entity_id,
        "Fetching ACL"
    );

    // Ctrl+C aborts the in-flight request
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received shutdown signal");
            signal_token.cancel();
        }
    });

    let acl = fetch_with_config(
        &config.acl,
        &cancel,
        &args.entity_id,
        args.empty_on_not_found,
    )
    .await
    .inspect_err(|e| error!(error = %e, "Failed to fetch ACL"))?;

    println!("{}", serde_json::to_string_pretty(&acl)?);
    Ok(())
}
