use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rideshare_server::cache::CachedStore;
use rideshare_server::config::{DataSource, ServerConfig};
use rideshare_server::store::{LocalStore, RemoteStore, TravellerStore};
use rideshare_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rideshare_server=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Load traveller records (fail fast if the snapshot is unreadable)
    let store = match &config.source {
        DataSource::File(path) => TravellerStore::Local(LocalStore::load(path).await?),
        DataSource::Remote(remote) => TravellerStore::Remote(RemoteStore::new(remote.clone())?),
    };
    info!("reading travellers from {}", store.describe());

    let cached = CachedStore::new(store, &config.cache);
    let state = AppState::new(cached, config.matching);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("ride-share server listening on http://{}", config.addr);
    info!("  GET  /health");
    info!("  GET  /api/transport/stats");
    info!("  GET  /api/transport/groups");
    info!("  GET  /api/transport/matches/:seekerId");
    info!("  GET  /api/transport/contact/:providerId?seekerId=");
    info!("  GET  /api/transport/export/groups.csv");
    info!("  GET  /api/transport/export/members.csv");
    info!("  POST /api/transport/cache/invalidate");

    axum::serve(listener, app).await?;
    Ok(())
}
