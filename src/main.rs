use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tapbridge::api::{create_router, AppState};
use tapbridge::automation::{CommandBridge, HandleRegistry};
use tapbridge::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    dotenvy::dotenv().ok();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.json"));
    let config = Config::load(&config_path)?;

    let registry = Arc::new(HandleRegistry::new());
    register_host_driver(&registry);

    let bridge = CommandBridge::new(Arc::clone(&registry));
    let state = Arc::new(AppState::new(bridge, config.clone()));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("tapbridge agent starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
fn register_host_driver(registry: &Arc<HandleRegistry>) {
    use tapbridge::automation::DesktopDriver;

    match DesktopDriver::new() {
        Ok(driver) => registry.register(Arc::new(driver)),
        Err(e) => {
            // Commands degrade to their neutral failure values until a
            // driver is registered
            tracing::warn!("no desktop driver available, running degraded: {e}");
        }
    }
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn register_host_driver(_registry: &Arc<HandleRegistry>) {
    tracing::info!("waiting for the platform layer to register a driver");
}
