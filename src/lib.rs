//! Pizza restaurants REST backend: restaurants, pizzas and the prices at which
//! restaurants offer them, stored in PostgreSQL.

pub mod config;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::Config;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{api_routes, app, common_routes};
pub use seed::seed_database;
pub use state::AppState;
pub use store::{ensure_database_exists, PgStore, PizzaStore};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pizza_api=info,tower_http=info")),
        )
        .init();
}

/// Connect, create the database if needed and apply the schema.
pub async fn connect_store(config: &Config) -> Result<PgStore, AppError> {
    ensure_database_exists(&config.database_url).await?;
    let store = PgStore::connect(&config.database_url, config.max_connections).await?;
    apply_migrations(store.pool()).await?;
    Ok(store)
}
