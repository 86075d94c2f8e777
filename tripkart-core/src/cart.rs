use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripkart_shared::Paise;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartStatus {
    Draft,
    Locked,
    Booked,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traveller {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

/// A working reservation for a single flight. The cart holds a decremented
/// seat only while `status == Locked` and `lock_expires_at` is in the future.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub status: CartStatus,
    /// Flight id of the single item slot, if any.
    pub item: Option<String>,
    pub travellers: Vec<Traveller>,
    pub convenience_fee: Paise,
    pub applied_offer_id: Option<String>,
    pub lock_expires_at: Option<DateTime<Utc>>,
    /// Bound at booking time if not already set.
    pub user_id: Option<String>,
}

impl Cart {
    pub fn new(convenience_fee: Paise) -> Self {
        Self {
            id: format!("CART-{}", Uuid::new_v4()),
            status: CartStatus::Draft,
            item: None,
            travellers: Vec::new(),
            convenience_fee,
            applied_offer_id: None,
            lock_expires_at: None,
            user_id: None,
        }
    }

    /// The one expiry guard every entry point consults. A lock counts only
    /// while the cart is LOCKED with an expiry strictly in the future.
    pub fn lock_active(&self, now: DateTime<Utc>) -> bool {
        self.status == CartStatus::Locked
            && self.lock_expires_at.map_or(false, |t| t > now)
    }

    /// LOCKED with a lapsed (or missing) expiry: the seat is still held in
    /// inventory and must be reclaimed by the next mutating operation.
    pub fn lock_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == CartStatus::Locked && !self.lock_active(now)
    }

    /// Status as readers should see it: an expired lock presents as DRAFT.
    pub fn effective_status(&self, now: DateTime<Utc>) -> CartStatus {
        if self.lock_expired(now) {
            CartStatus::Draft
        } else {
            self.status
        }
    }
}
