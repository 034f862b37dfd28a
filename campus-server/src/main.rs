//! Campus API server.
//!
//! Run from repo root: `cargo run -p campus-server`
//! Reads `DB_*` and `SERVER_ADDR` from the environment or a `.env` file.

use campus_api::{serve, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("campus_api=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.server_addr, database = %config.db.name, "starting campus-server");
    serve(config).await?;
    Ok(())
}
