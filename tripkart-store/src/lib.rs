//! Record store for the booking engine: an in-memory transactional store
//! behind the repository traits, plus the layered application config.

pub mod app_config;
pub mod memory;

pub use memory::MemStore;
