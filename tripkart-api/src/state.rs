use std::sync::Arc;

use tripkart_core::repository::{FlightRepository, UserRepository};
use tripkart_order::{BookingOrchestrator, CartManager};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<dyn FlightRepository>,
    pub users: Arc<dyn UserRepository>,
    pub carts: Arc<CartManager>,
    pub orchestrator: Arc<BookingOrchestrator>,
    pub auth: AuthConfig,
}
