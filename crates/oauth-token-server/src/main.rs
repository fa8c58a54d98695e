//! Token server entry point.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use oauth_token_server::config::{Config, Credentials, defaults};
use oauth_token_server::server::TokenServer;

#[derive(Parser, Debug)]
#[command(name = "oauth-token-server")]
#[command(about = "Password-grant OAuth2 token server")]
#[command(version)]
struct Cli {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: IpAddr,

    /// HTTP server port
    #[arg(long, default_value_t = defaults::PORT, env = "PORT")]
    port: u16,

    /// Access token lifetime in seconds
    #[arg(long, default_value_t = defaults::TOKEN_TTL.as_secs(), env = "OAUTH_TOKEN_TTL_SECS")]
    token_ttl: u64,

    /// JSON file with users and clients (defaults to the built-in seed)
    #[arg(long, env = "OAUTH_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Serve only the token endpoint
    #[arg(long)]
    no_resource: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting OAuth token server");

    let mut config = Config::new(Duration::from_secs(cli.token_ttl));
    config.listen_addr = SocketAddr::new(cli.host, cli.port);
    config.enable_resource_route = !cli.no_resource;
    if let Some(path) = &cli.credentials {
        tracing::info!(path = %path.display(), "Loading credentials file");
        config.credentials = Credentials::from_json_file(path)?;
    }
    config.validate()?;

    tracing::info!(
        users = config.credentials.users.len(),
        clients = config.credentials.clients.len(),
        "Credentials loaded"
    );

    TokenServer::new(config).run_http().await
}
