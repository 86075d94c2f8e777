use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tripkart_shared::Paise;

/// A flight itinerary plus its seat inventory. Itinerary fields are
/// immutable; `seats_available` is mutated only inside the seat-lock
/// protocol and never drops below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "departTimeISO")]
    pub depart_time: DateTime<FixedOffset>,
    #[serde(rename = "arriveTimeISO")]
    pub arrive_time: DateTime<FixedOffset>,
    pub airline: String,
    pub flight_no: String,
    pub duration_mins: i64,
    pub base_fare: Paise,
    pub taxes_and_fees: Paise,
    pub seats_available: i64,
}
