//! Pricing engine and the seed catalog of flights and promotional offers.

pub mod pricing;
pub mod seed;

pub use pricing::compute_price;
