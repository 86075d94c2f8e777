//! Offer engine: filters and ranks promotional offers for a cart.

pub mod engine;

pub use engine::{best_offer, eligible_offers};
