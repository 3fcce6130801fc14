//! Pandemic Statistics Service
//!
//! Pulls per-country statistics from the upstream API into a relational
//! store and serves them back over HTTP:
//! - Normalization of loosely typed upstream payloads
//! - Transactional upsert keyed by country
//! - Filtered, sorted, paginated listing and aggregates

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use api::{router, AppState};
use store::{StoreClient, StoreConfig};
use telemetry::{health, init_tracing_from_env};
use upstream::{RapidApiClient, StatsSource, UpstreamConfig};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    database: StoreConfig,

    #[serde(default)]
    upstream: UpstreamConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: StoreConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // rustls 0.23+ requires explicit crypto provider selection before any TLS use
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Pandemic Statistics Service v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    config
        .upstream
        .validate()
        .context("Invalid upstream configuration")?;
    info!(
        upstream = %config.upstream.url,
        api_key_set = config.upstream.api_key.is_some(),
        "Loaded upstream config"
    );

    let store = Arc::new(
        StoreClient::connect(config.database.clone())
            .await
            .context("Failed to connect to record store")?,
    );

    store::schema::init_schema(&store)
        .await
        .context("Failed to initialize record store schema")?;

    check_health(&store).await;

    let source: Arc<dyn StatsSource> = Arc::new(
        RapidApiClient::new(&config.upstream).context("Failed to create upstream client")?,
    );

    let state = AppState::new(source, store.clone());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down...");
    store.inner().clone().close().await.ok();

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // PANDEMIC_PORT, PANDEMIC_DATABASE__POOL_SIZE, ...
        .add_source(
            config::Environment::default()
                .prefix("PANDEMIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Nested keys with underscores do not map reliably through the separator
    if let Ok(url) = std::env::var("PANDEMIC_DATABASE_URL") {
        config.database.url = url;
    }
    if let Ok(url) = std::env::var("PANDEMIC_UPSTREAM_URL") {
        config.upstream.url = url;
    }
    if let Ok(key) = std::env::var("RAPIDAPI_KEY") {
        config.upstream.api_key = Some(key);
    }

    Ok(config)
}

/// Check component health on startup.
async fn check_health(store: &StoreClient) {
    if store::health::check_connection(store).await {
        health().store.set_healthy();
        info!("Record store connection: healthy");
    } else {
        health().store.set_unhealthy("Connection failed");
        error!("Record store connection: unhealthy");
    }

    health().upstream.set_unhealthy("No fetch yet");
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
