//! Cart lifecycle and the booking/payment orchestration on top of it.

pub mod cart;
pub mod error;
pub mod orchestrator;

pub use cart::CartManager;
pub use error::OrderError;
pub use orchestrator::BookingOrchestrator;
