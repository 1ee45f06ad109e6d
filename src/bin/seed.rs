//! Reset the configured database to the sample data set.

use pizza_api::{connect_store, init_tracing, seed_database, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing();

    let store = connect_store(&config).await?;
    seed_database(&store).await?;
    Ok(())
}
