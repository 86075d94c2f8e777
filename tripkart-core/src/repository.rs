use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tripkart_shared::Paise;

use crate::{Booking, Cart, Flight, Offer, Payment, StoreError, Traveller, User};

/// Repository trait for flight inventory access.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn get_flight(&self, id: &str) -> Result<Option<Flight>, StoreError>;

    /// Search by optional origin/destination city codes (already upper-cased).
    async fn search_flights(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<Flight>, StoreError>;
}

/// Repository trait for the promotional offer catalog.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn list_offers(&self) -> Result<Vec<Offer>, StoreError>;

    async fn get_offer(&self, id: &str) -> Result<Option<Offer>, StoreError>;
}

/// Repository trait for cart state. The compound operations (`lock_cart`,
/// `release_expired_lock`) are each a single transaction: concurrent lock
/// attempts on the same flight serialize through them, and a failed attempt
/// commits nothing.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn create_cart(&self, cart: Cart) -> Result<Cart, StoreError>;

    async fn get_cart(&self, id: &str) -> Result<Option<Cart>, StoreError>;

    /// Replace the single item slot. No status check, no inventory touch.
    async fn set_item(&self, cart_id: &str, flight_id: &str) -> Result<Cart, StoreError>;

    /// Delete-all, insert-all replacement of the traveller list.
    async fn replace_travellers(
        &self,
        cart_id: &str,
        travellers: Vec<Traveller>,
    ) -> Result<Cart, StoreError>;

    async fn set_applied_offer(
        &self,
        cart_id: &str,
        offer_id: Option<String>,
    ) -> Result<Cart, StoreError>;

    /// The seat-lock protocol. Idempotent for an active lock; an expired lock
    /// is released and re-acquired in the same transaction; `NoSeats` aborts
    /// with zero side effects.
    async fn lock_cart(
        &self,
        cart_id: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Cart, StoreError>;

    /// Reclaim the seat of an expired lock and revert the cart to DRAFT.
    /// A cart without an expired lock is returned unchanged.
    async fn release_expired_lock(
        &self,
        cart_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Cart, StoreError>;
}

/// Repository trait for payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create_payment(&self, payment: Payment) -> Result<Payment, StoreError>;

    async fn get_payment(&self, id: &str) -> Result<Option<Payment>, StoreError>;

    /// Idempotent CREATED -> CAPTURED transition; a captured payment is
    /// returned as-is and keeps its original provider reference.
    async fn capture_payment(
        &self,
        id: &str,
        provider_ref: String,
    ) -> Result<Payment, StoreError>;

    async fn find_captured(
        &self,
        cart_id: &str,
        user_id: &str,
    ) -> Result<Option<Payment>, StoreError>;
}

/// Repository trait for bookings. `commit_booking` is the one place a
/// booking can be created, atomically with the cart's BOOKED transition.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Re-validates LOCKED + unexpired inside the transaction, then creates
    /// the CONFIRMED booking, flips the cart to BOOKED and binds its user.
    async fn commit_booking(
        &self,
        cart_id: &str,
        user_id: &str,
        total_paid: Paise,
        now: DateTime<Utc>,
    ) -> Result<Booking, StoreError>;

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, StoreError>;

    async fn list_bookings(&self, user_id: &str) -> Result<Vec<Booking>, StoreError>;
}

/// Repository trait for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `EmailTaken` on a duplicate email.
    async fn create_user(&self, user: User) -> Result<User, StoreError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replace the display name; `None` clears it.
    async fn update_name(&self, id: &str, name: Option<String>) -> Result<User, StoreError>;
}
