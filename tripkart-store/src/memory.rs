use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tripkart_core::repository::{
    BookingRepository, CartRepository, FlightRepository, OfferRepository, PaymentRepository,
    UserRepository,
};
use tripkart_core::{
    Booking, BookingStatus, Cart, CartStatus, Flight, Offer, Payment, PaymentStatus, StoreError,
    Traveller, User,
};
use tripkart_shared::Paise;
use uuid::Uuid;

/// In-memory transactional store.
///
/// One mutex guards all mutable state; every compound operation runs under a
/// single guard acquisition, so the check-then-decrement of the seat-lock
/// protocol is serialized against every other lock attempt. Mutations inside
/// a compound op are staged on locals and written only once every check has
/// passed, so a failed op commits nothing.
pub struct MemStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    flights: HashMap<String, Flight>,
    offers: Vec<Offer>,
    carts: HashMap<String, Cart>,
    payments: HashMap<String, Payment>,
    bookings: HashMap<String, Booking>,
    users: HashMap<String, User>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn seeded(flights: Vec<Flight>, offers: Vec<Offer>) -> Self {
        let store = Self::new();
        {
            let mut inner = store
                .inner
                .try_lock()
                .expect("fresh store is uncontended");
            inner.flights = flights.into_iter().map(|f| (f.id.clone(), f)).collect();
            inner.offers = offers;
        }
        store
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlightRepository for MemStore {
    async fn get_flight(&self, id: &str) -> Result<Option<Flight>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.flights.get(id).cloned())
    }

    async fn search_flights(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<Flight>, StoreError> {
        let inner = self.inner.lock().await;
        let mut flights: Vec<Flight> = inner
            .flights
            .values()
            .filter(|f| from.map_or(true, |v| f.from == v))
            .filter(|f| to.map_or(true, |v| f.to == v))
            .cloned()
            .collect();
        flights.sort_by(|a, b| a.depart_time.cmp(&b.depart_time));
        Ok(flights)
    }
}

#[async_trait]
impl OfferRepository for MemStore {
    async fn list_offers(&self) -> Result<Vec<Offer>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.offers.clone())
    }

    async fn get_offer(&self, id: &str) -> Result<Option<Offer>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.offers.iter().find(|o| o.id == id).cloned())
    }
}

#[async_trait]
impl CartRepository for MemStore {
    async fn create_cart(&self, cart: Cart) -> Result<Cart, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.carts.insert(cart.id.clone(), cart.clone());
        Ok(cart)
    }

    async fn get_cart(&self, id: &str) -> Result<Option<Cart>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.carts.get(id).cloned())
    }

    async fn set_item(&self, cart_id: &str, flight_id: &str) -> Result<Cart, StoreError> {
        let mut inner = self.inner.lock().await;
        let cart = inner
            .carts
            .get_mut(cart_id)
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        cart.item = Some(flight_id.to_string());
        Ok(cart.clone())
    }

    async fn replace_travellers(
        &self,
        cart_id: &str,
        travellers: Vec<Traveller>,
    ) -> Result<Cart, StoreError> {
        let mut inner = self.inner.lock().await;
        let cart = inner
            .carts
            .get_mut(cart_id)
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        cart.travellers = travellers;
        Ok(cart.clone())
    }

    async fn set_applied_offer(
        &self,
        cart_id: &str,
        offer_id: Option<String>,
    ) -> Result<Cart, StoreError> {
        let mut inner = self.inner.lock().await;
        let cart = inner
            .carts
            .get_mut(cart_id)
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        cart.applied_offer_id = offer_id;
        Ok(cart.clone())
    }

    async fn lock_cart(
        &self,
        cart_id: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Cart, StoreError> {
        let mut inner = self.inner.lock().await;

        let cart = inner
            .carts
            .get(cart_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        let flight_id = cart
            .item
            .clone()
            .ok_or_else(|| StoreError::EmptyCart(cart_id.to_string()))?;

        // Idempotent path: an active lock returns current state untouched.
        if cart.lock_active(now) {
            return Ok(cart);
        }

        // Stage the transition; nothing is written until every check passes.
        let flight = inner
            .flights
            .get(&flight_id)
            .ok_or_else(|| StoreError::not_found("flight", &flight_id))?;
        let mut seats = flight.seats_available;
        if cart.lock_expired(now) {
            // Our own expired hold comes back to the pool first.
            seats += 1;
        }
        if seats <= 0 {
            return Err(StoreError::NoSeats(flight_id));
        }
        seats -= 1;

        if let Some(flight) = inner.flights.get_mut(&flight_id) {
            flight.seats_available = seats;
        }
        let cart = inner
            .carts
            .get_mut(cart_id)
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        cart.status = CartStatus::Locked;
        cart.lock_expires_at = Some(now + ttl);
        tracing::debug!(cart = cart_id, flight = %flight_id, seats_left = seats, "seat locked");
        Ok(cart.clone())
    }

    async fn release_expired_lock(
        &self,
        cart_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Cart, StoreError> {
        let mut inner = self.inner.lock().await;

        let cart = inner
            .carts
            .get(cart_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        if !cart.lock_expired(now) {
            return Ok(cart);
        }

        if let Some(flight_id) = &cart.item {
            if let Some(flight) = inner.flights.get_mut(flight_id) {
                flight.seats_available += 1;
            }
        }
        let cart = inner
            .carts
            .get_mut(cart_id)
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        cart.status = CartStatus::Draft;
        cart.lock_expires_at = None;
        tracing::debug!(cart = cart_id, "expired lock released");
        Ok(cart.clone())
    }
}

#[async_trait]
impl PaymentRepository for MemStore {
    async fn create_payment(&self, payment: Payment) -> Result<Payment, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.payments.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    async fn get_payment(&self, id: &str) -> Result<Option<Payment>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.payments.get(id).cloned())
    }

    async fn capture_payment(
        &self,
        id: &str,
        provider_ref: String,
    ) -> Result<Payment, StoreError> {
        let mut inner = self.inner.lock().await;
        let payment = inner
            .payments
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("payment", id))?;
        if payment.status != PaymentStatus::Captured {
            payment.status = PaymentStatus::Captured;
            payment.provider_ref = Some(provider_ref);
        }
        Ok(payment.clone())
    }

    async fn find_captured(
        &self,
        cart_id: &str,
        user_id: &str,
    ) -> Result<Option<Payment>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .payments
            .values()
            .filter(|p| {
                p.cart_id == cart_id
                    && p.user_id == user_id
                    && p.status == PaymentStatus::Captured
            })
            .max_by_key(|p| p.created_at)
            .cloned())
    }
}

#[async_trait]
impl BookingRepository for MemStore {
    async fn commit_booking(
        &self,
        cart_id: &str,
        user_id: &str,
        total_paid: Paise,
        now: DateTime<Utc>,
    ) -> Result<Booking, StoreError> {
        let mut inner = self.inner.lock().await;

        let cart = inner
            .carts
            .get(cart_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        // Re-validated inside the transaction: a booking must never exist
        // without the cart reflecting BOOKED.
        if cart.status != CartStatus::Locked {
            return Err(StoreError::NotLocked(cart_id.to_string()));
        }
        if !cart.lock_active(now) {
            return Err(StoreError::LockExpired(cart_id.to_string()));
        }

        let booking = Booking {
            id: format!("BK-{}", Uuid::new_v4()),
            cart_id: cart_id.to_string(),
            user_id: user_id.to_string(),
            status: BookingStatus::Confirmed,
            total_paid,
            created_at: now,
        };
        inner.bookings.insert(booking.id.clone(), booking.clone());

        let cart = inner
            .carts
            .get_mut(cart_id)
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        cart.status = CartStatus::Booked;
        if cart.user_id.is_none() {
            cart.user_id = Some(user_id.to_string());
        }
        tracing::info!(cart = cart_id, booking = %booking.id, "booking committed");
        Ok(booking)
    }

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.bookings.get(id).cloned())
    }

    async fn list_bookings(&self, user_id: &str) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.lock().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }
}

#[async_trait]
impl UserRepository for MemStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::EmailTaken(user.email));
        }
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_name(&self, id: &str, name: Option<String>) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        let user = inner
            .users
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        user.name = name;
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tripkart_catalog::seed;

    fn ttl() -> Duration {
        Duration::minutes(15)
    }

    async fn store_with_cart(seats: i64) -> (Arc<MemStore>, String, String) {
        let mut flights = seed::flights();
        flights[0].seats_available = seats;
        let flight_id = flights[0].id.clone();
        let store = Arc::new(MemStore::seeded(flights, seed::offers()));

        let mut cart = Cart::new(24_900);
        cart.item = Some(flight_id.clone());
        let cart = store.create_cart(cart).await.unwrap();
        (store, cart.id, flight_id)
    }

    async fn seats(store: &MemStore, flight_id: &str) -> i64 {
        store
            .get_flight(flight_id)
            .await
            .unwrap()
            .unwrap()
            .seats_available
    }

    #[tokio::test]
    async fn test_lock_decrements_and_is_idempotent() {
        let (store, cart_id, flight_id) = store_with_cart(6).await;
        let now = Utc::now();

        let cart = store.lock_cart(&cart_id, now, ttl()).await.unwrap();
        assert_eq!(cart.status, CartStatus::Locked);
        assert_eq!(cart.lock_expires_at, Some(now + ttl()));
        assert_eq!(seats(&store, &flight_id).await, 5);

        // Re-locking an active lock mutates nothing.
        let again = store.lock_cart(&cart_id, now, ttl()).await.unwrap();
        assert_eq!(again.lock_expires_at, cart.lock_expires_at);
        assert_eq!(seats(&store, &flight_id).await, 5);
    }

    #[tokio::test]
    async fn test_lock_fails_with_no_seats_and_no_side_effects() {
        let (store, cart_id, flight_id) = store_with_cart(0).await;
        let now = Utc::now();

        let err = store.lock_cart(&cart_id, now, ttl()).await.unwrap_err();
        assert!(matches!(err, StoreError::NoSeats(_)));
        assert_eq!(seats(&store, &flight_id).await, 0);
        let cart = store.get_cart(&cart_id).await.unwrap().unwrap();
        assert_eq!(cart.status, CartStatus::Draft);
    }

    #[tokio::test]
    async fn test_expired_lock_is_released_then_reacquired() {
        let (store, cart_id, flight_id) = store_with_cart(1).await;
        let now = Utc::now();

        store.lock_cart(&cart_id, now, ttl()).await.unwrap();
        assert_eq!(seats(&store, &flight_id).await, 0);

        // Re-lock after the TTL has lapsed: release + decrement, net zero.
        let later = now + ttl() + Duration::seconds(1);
        let cart = store.lock_cart(&cart_id, later, ttl()).await.unwrap();
        assert_eq!(cart.status, CartStatus::Locked);
        assert_eq!(cart.lock_expires_at, Some(later + ttl()));
        assert_eq!(seats(&store, &flight_id).await, 0);
    }

    #[tokio::test]
    async fn test_last_seat_race_admits_exactly_one() {
        let mut flights = seed::flights();
        flights[0].seats_available = 1;
        let flight_id = flights[0].id.clone();
        let store = Arc::new(MemStore::seeded(flights, seed::offers()));

        let mut ids = Vec::new();
        for _ in 0..2 {
            let mut cart = Cart::new(24_900);
            cart.item = Some(flight_id.clone());
            ids.push(store.create_cart(cart).await.unwrap().id);
        }

        let now = Utc::now();
        let tasks: Vec<_> = ids
            .iter()
            .map(|id| {
                let store = store.clone();
                let id = id.clone();
                tokio::spawn(async move { store.lock_cart(&id, now, ttl()).await })
            })
            .collect();

        let mut won = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => won += 1,
                Err(StoreError::NoSeats(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!((won, conflicts), (1, 1));
        assert_eq!(seats(&store, &flight_id).await, 0);
    }

    #[tokio::test]
    async fn test_release_expired_lock_reverts_to_draft() {
        let (store, cart_id, flight_id) = store_with_cart(3).await;
        let now = Utc::now();
        store.lock_cart(&cart_id, now, ttl()).await.unwrap();

        // Not expired yet: a release attempt is a no-op.
        let cart = store.release_expired_lock(&cart_id, now).await.unwrap();
        assert_eq!(cart.status, CartStatus::Locked);
        assert_eq!(seats(&store, &flight_id).await, 2);

        let later = now + ttl() + Duration::seconds(1);
        let cart = store.release_expired_lock(&cart_id, later).await.unwrap();
        assert_eq!(cart.status, CartStatus::Draft);
        assert_eq!(cart.lock_expires_at, None);
        assert_eq!(seats(&store, &flight_id).await, 3);
    }

    #[tokio::test]
    async fn test_commit_booking_flips_cart_and_binds_user() {
        let (store, cart_id, _) = store_with_cart(6).await;
        let now = Utc::now();
        store.lock_cart(&cart_id, now, ttl()).await.unwrap();

        let booking = store
            .commit_booking(&cart_id, "USR-1", 2_300_000, now)
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.total_paid, 2_300_000);

        let cart = store.get_cart(&cart_id).await.unwrap().unwrap();
        assert_eq!(cart.status, CartStatus::Booked);
        assert_eq!(cart.user_id.as_deref(), Some("USR-1"));

        // Booking is terminal: a second commit finds the cart off LOCKED.
        let err = store
            .commit_booking(&cart_id, "USR-1", 2_300_000, now)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotLocked(_)));
    }

    #[tokio::test]
    async fn test_capture_payment_is_idempotent() {
        let (store, cart_id, _) = store_with_cart(6).await;
        let now = Utc::now();
        let payment = store
            .create_payment(Payment::created(&cart_id, "USR-1", 99_000, now))
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Created);

        let captured = store
            .capture_payment(&payment.id, "MOCK-REF-1".to_string())
            .await
            .unwrap();
        assert_eq!(captured.status, PaymentStatus::Captured);
        assert_eq!(captured.provider_ref.as_deref(), Some("MOCK-REF-1"));

        // A second confirm keeps the original reference.
        let again = store
            .capture_payment(&payment.id, "MOCK-REF-2".to_string())
            .await
            .unwrap();
        assert_eq!(again.provider_ref.as_deref(), Some("MOCK-REF-1"));
    }

    #[tokio::test]
    async fn test_update_name_replaces_and_clears() {
        let store = MemStore::new();
        let user = store
            .create_user(User::new("b@example.com", Some("Old".into()), "hash".into()))
            .await
            .unwrap();

        let user = store
            .update_name(&user.id, Some("New".to_string()))
            .await
            .unwrap();
        assert_eq!(user.name.as_deref(), Some("New"));

        let user = store.update_name(&user.id, None).await.unwrap();
        assert_eq!(user.name, None);

        let err = store.update_name("USR-missing", None).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemStore::new();
        store
            .create_user(User::new("a@example.com", None, "hash".into()))
            .await
            .unwrap();
        let err = store
            .create_user(User::new("a@example.com", None, "hash".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken(_)));
    }
}
