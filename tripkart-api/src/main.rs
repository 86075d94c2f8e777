use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripkart_api::{app, AppState, AuthConfig};
use tripkart_catalog::seed;
use tripkart_order::{BookingOrchestrator, CartManager};
use tripkart_store::MemStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripkart_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = tripkart_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting TripKart API on port {}", config.server.port);

    let store = Arc::new(MemStore::seeded(seed::flights(), seed::offers()));
    let manager = Arc::new(CartManager::new(
        store.clone(),
        store.clone(),
        store.clone(),
        config.business_rules.convenience_fee,
        Duration::seconds(config.business_rules.lock_ttl_seconds as i64),
    ));
    let orchestrator = Arc::new(BookingOrchestrator::new(
        store.clone(),
        store.clone(),
        store.clone(),
        manager.clone(),
    ));

    let app_state = AppState {
        flights: store.clone(),
        users: store,
        carts: manager,
        orchestrator,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind failed");
    axum::serve(listener, app).await.expect("server error");
}
