use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripkart_shared::Paise;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
}

/// Created exactly once per cart, in the same transaction that flips the
/// cart to BOOKED. Immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub cart_id: String,
    pub user_id: String,
    pub status: BookingStatus,
    pub total_paid: Paise,
    pub created_at: DateTime<Utc>,
}
