use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use emailarchief::bootstrap;
use emailarchief::config::AppConfig;
use emailarchief::db::DbHandle;
use emailarchief::routes;
use emailarchief::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(
        component = "server",
        database_url = %config.redacted_database_url(),
        pool_size = config.database_max_pool_size,
        port = config.port,
        "loaded configuration"
    );

    // Waits for the database, migrates, and seeds; fatal once the retry
    // budget is exhausted.
    tokio::task::spawn_blocking({
        let config = config.clone();
        move || bootstrap::ensure_schema(&config)
    })
    .await??;

    let db = DbHandle::connect(&config.database_url, config.database_max_pool_size);
    if !db.is_pooled() {
        tracing::warn!("serving with direct database connections");
    }

    let listen_addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let state = AppState::new(db, config);
    let router = routes::create_router(state);

    let listener = TcpListener::bind(listen_addr).await?;
    tracing::info!("listening on {listen_addr}");

    axum::serve(listener, router).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
