use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripkart_shared::Paise;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Created,
    Captured,
}

/// A payment snapshot taken at lock time. Immutable except for the one
/// CREATED -> CAPTURED transition, which attaches the provider reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub cart_id: String,
    pub user_id: String,
    pub amount: Paise,
    pub currency: String,
    pub status: PaymentStatus,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn created(cart_id: &str, user_id: &str, amount: Paise, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("PAY-{}", Uuid::new_v4()),
            cart_id: cart_id.to_string(),
            user_id: user_id.to_string(),
            amount,
            currency: "INR".to_string(),
            status: PaymentStatus::Created,
            provider: "MOCK".to_string(),
            provider_ref: None,
            created_at: now,
        }
    }
}
