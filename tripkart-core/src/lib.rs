//! Domain models and the storage seam for the Tripkart booking engine.
//!
//! Everything stateful lives behind the repository traits in [`repository`];
//! the models here are plain data with the wire (camelCase JSON) shapes the
//! web client consumes.

pub mod booking;
pub mod cart;
pub mod error;
pub mod flight;
pub mod offer;
pub mod payment;
pub mod price;
pub mod repository;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use cart::{Cart, CartStatus, Gender, Traveller};
pub use error::StoreError;
pub use flight::Flight;
pub use offer::{DiscountType, Offer, OfferChannel};
pub use payment::{Payment, PaymentStatus};
pub use price::PriceBreakdown;
pub use user::User;
