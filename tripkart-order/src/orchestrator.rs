use std::sync::Arc;

use chrono::Utc;
use tripkart_core::repository::{BookingRepository, CartRepository, PaymentRepository};
use tripkart_core::{Booking, Cart, CartStatus, Payment};
use uuid::Uuid;

use crate::{CartManager, OrderError};

/// Drives a locked cart through payment and into a booking. Payment amounts
/// are snapshotted from the breakdown at creation time; booking re-validates
/// the lock and re-derives the total inside the store transaction.
pub struct BookingOrchestrator {
    carts: Arc<dyn CartRepository>,
    payments: Arc<dyn PaymentRepository>,
    bookings: Arc<dyn BookingRepository>,
    manager: Arc<CartManager>,
}

impl BookingOrchestrator {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        payments: Arc<dyn PaymentRepository>,
        bookings: Arc<dyn BookingRepository>,
        manager: Arc<CartManager>,
    ) -> Self {
        Self {
            carts,
            payments,
            bookings,
            manager,
        }
    }

    /// A cart is open to any user until a booking binds it.
    fn check_owner(cart: &Cart, user_id: &str) -> Result<(), OrderError> {
        match &cart.user_id {
            Some(owner) if owner != user_id => Err(OrderError::Forbidden(
                "Cart does not belong to user".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Create a CREATED payment for a locked cart, amount = current
    /// totalPayable. Finding the lock expired here releases the seat back to
    /// inventory before failing; this is the one read path with that side
    /// effect.
    pub async fn create_payment(
        &self,
        user_id: &str,
        cart_id: &str,
    ) -> Result<Payment, OrderError> {
        let cart = self.manager.get_cart(cart_id).await?;
        Self::check_owner(&cart, user_id)?;
        if cart.status != CartStatus::Locked {
            return Err(OrderError::InvalidState("Cart must be LOCKED".to_string()));
        }
        let now = Utc::now();
        if !cart.lock_active(now) {
            self.carts.release_expired_lock(cart_id, now).await?;
            return Err(OrderError::InvalidState("Lock expired".to_string()));
        }
        let price = self.manager.price_of(&cart).await?;
        let payment = self
            .payments
            .create_payment(Payment::created(cart_id, user_id, price.total_payable, now))
            .await?;
        tracing::info!(payment = %payment.id, cart = %cart_id, amount = payment.amount, "payment created");
        Ok(payment)
    }

    /// Mock capture. Idempotent; a second confirm returns the captured
    /// payment with its original provider reference.
    pub async fn confirm_payment(
        &self,
        user_id: &str,
        payment_id: &str,
    ) -> Result<Payment, OrderError> {
        let payment = self
            .payments
            .get_payment(payment_id)
            .await?
            .ok_or_else(|| OrderError::NotFound("Payment not found".to_string()))?;
        if payment.user_id != user_id {
            return Err(OrderError::Forbidden("Forbidden".to_string()));
        }
        let payment = self
            .payments
            .capture_payment(payment_id, format!("MOCK-{}", Uuid::new_v4()))
            .await?;
        tracing::info!(payment = %payment.id, "payment captured");
        Ok(payment)
    }

    /// Finalize the cart into a CONFIRMED booking. Requires an active lock
    /// and a CAPTURED payment by this user for this cart. Deliberately not
    /// idempotent: the BOOKED cart makes a second call fail.
    pub async fn create_booking(
        &self,
        user_id: &str,
        cart_id: &str,
    ) -> Result<Booking, OrderError> {
        let cart = self.manager.get_cart(cart_id).await?;
        Self::check_owner(&cart, user_id)?;
        if cart.status != CartStatus::Locked {
            return Err(OrderError::InvalidState("Cart must be LOCKED".to_string()));
        }
        let now = Utc::now();
        if !cart.lock_active(now) {
            return Err(OrderError::InvalidState("Lock expired".to_string()));
        }
        if self
            .payments
            .find_captured(cart_id, user_id)
            .await?
            .is_none()
        {
            return Err(OrderError::InvalidState("Payment required".to_string()));
        }
        let price = self.manager.price_of(&cart).await?;
        let booking = self
            .bookings
            .commit_booking(cart_id, user_id, price.total_payable, now)
            .await?;
        tracing::info!(booking = %booking.id, cart = %cart_id, total = booking.total_paid, "booking confirmed");
        Ok(booking)
    }

    pub async fn list_bookings(&self, user_id: &str) -> Result<Vec<Booking>, OrderError> {
        Ok(self.bookings.list_bookings(user_id).await?)
    }

    pub async fn get_booking(&self, user_id: &str, id: &str) -> Result<Booking, OrderError> {
        let booking = self
            .bookings
            .get_booking(id)
            .await?
            .ok_or_else(|| OrderError::NotFound("Not found".to_string()))?;
        if booking.user_id != user_id {
            return Err(OrderError::Forbidden("Forbidden".to_string()));
        }
        Ok(booking)
    }
}
