//! HTTP server.

use pizza_api::{app, connect_store, init_tracing, AppState, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing();

    let store = connect_store(&config).await?;
    let state = AppState::new(store);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, &config)).await?;
    Ok(())
}
