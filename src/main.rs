use std::net::SocketAddr;
use std::sync::Arc;

use smart_submissions::{
    app::build_router,
    config::{init_config, LogFormat},
    database::pool::connect_store,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = init_config()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let store = connect_store(config).await?;
    let app_state = AppState::new(store, Arc::new(config.clone()));
    let app = build_router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!(
        strict_transitions = config.strict_transitions,
        "Server listening on {}", addr
    );
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
