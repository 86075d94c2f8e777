use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripkart_shared::Paise;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferChannel {
    Upi,
    Card,
    Netbanking,
    Wallet,
    Coupon,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Flat,
    Percent,
}

/// An immutable promotional catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub provider: String,
    pub channel: OfferChannel,
    pub discount_type: DiscountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_off: Option<Paise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cap: Option<Paise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_txn: Option<Paise>,
    #[serde(rename = "validTillISO")]
    pub valid_till: DateTime<Utc>,
    pub priority: i64,
}

impl Offer {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_till > now
    }

    pub fn min_txn_met(&self, subtotal: Paise) -> bool {
        self.min_txn.map_or(true, |min| subtotal >= min)
    }
}
