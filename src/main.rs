use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reservation_api::{
    app,
    config::Config,
    services::cleanup::HoldSweeper,
    store::PgStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting reservation booking API");

    // Connect to the database
    let store = PgStore::connect(&config.database).await?;
    info!("Database connected");

    // Run migrations
    store.run_migrations().await?;

    // Create the shared application state
    let addr = SocketAddr::new(config.app.host.parse()?, config.app.port);
    let state = AppState::new(Arc::new(store), config);

    // --- Start background tasks ---

    // Reclaim expired booking holds every 5 minutes
    let sweeper = HoldSweeper::new(state.clone());
    task::spawn(async move {
        loop {
            sweeper.run_once().await;
            tokio::time::sleep(Duration::from_secs(300)).await;
        }
    });

    // --- Start the web server ---

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state).into_make_service()).await?;

    Ok(())
}
