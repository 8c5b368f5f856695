use std::sync::Arc;

use anyhow::Result;
use coffee::{
    AppState, CoffeeService,
    config::{Settings, StorageBackend},
    create_router,
    repositories::{CoffeeStore, MemoryCoffeeStore, RedisCoffeeStore},
};
use common::cache::{RedisConfig, RedisPool};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!("Starting coffee service");

    let store: Arc<dyn CoffeeStore> = match settings.storage {
        StorageBackend::Redis => {
            let redis_config = RedisConfig::from_env()?;
            let redis_pool = RedisPool::new(&redis_config)?;

            // Check store connectivity
            if redis_pool.health_check().await? {
                info!("Redis connection successful");
            } else {
                anyhow::bail!("Failed to connect to Redis");
            }

            Arc::new(RedisCoffeeStore::new(redis_pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            Arc::new(MemoryCoffeeStore::new())
        }
    };

    let app_state = AppState {
        coffee_service: CoffeeService::new(store),
    };

    // Start the web server
    let app = create_router(app_state);

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Coffee service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down coffee service");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
