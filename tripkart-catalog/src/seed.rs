//! Seed catalog mirroring the mock fixture set used by the web client.

use chrono::{DateTime, FixedOffset, Utc};
use tripkart_core::{DiscountType, Flight, Offer, OfferChannel};
use tripkart_shared::money::to_paise;

pub const SEED_SEATS: i64 = 6;

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid seed timestamp")
}

fn ts_utc(s: &str) -> DateTime<Utc> {
    ts(s).with_timezone(&Utc)
}

pub fn flights() -> Vec<Flight> {
    vec![
        Flight {
            id: "FL-INDIGO-0610".to_string(),
            from: "GOI".to_string(),
            to: "CCU".to_string(),
            depart_time: ts("2026-01-03T06:10:00+05:30"),
            arrive_time: ts("2026-01-03T09:15:00+05:30"),
            airline: "IndiGo".to_string(),
            flight_no: "6E-XXXX".to_string(),
            duration_mins: 185,
            base_fare: to_paise(18_570),
            taxes_and_fees: to_paise(4_432),
            seats_available: SEED_SEATS,
        },
        Flight {
            id: "FL-AIRINDIA-0810".to_string(),
            from: "GOI".to_string(),
            to: "CCU".to_string(),
            depart_time: ts("2026-01-03T08:10:00+05:30"),
            arrive_time: ts("2026-01-03T11:25:00+05:30"),
            airline: "Air India".to_string(),
            flight_no: "AI-YYY".to_string(),
            duration_mins: 195,
            base_fare: to_paise(17_650),
            taxes_and_fees: to_paise(5_120),
            seats_available: SEED_SEATS,
        },
    ]
}

pub fn offers() -> Vec<Offer> {
    vec![
        Offer {
            id: "OFF-HDFC-UPI-1200".to_string(),
            title: "HDFC UPI Offer".to_string(),
            provider: "HDFC".to_string(),
            channel: OfferChannel::Upi,
            discount_type: DiscountType::Flat,
            flat_off: Some(to_paise(1_200)),
            percent_off: None,
            max_cap: None,
            min_txn: Some(to_paise(10_000)),
            valid_till: ts_utc("2027-01-31T23:59:59+05:30"),
            priority: 100,
        },
        Offer {
            id: "OFF-ICICI-CARD-800".to_string(),
            title: "ICICI Credit Card Offer".to_string(),
            provider: "ICICI".to_string(),
            channel: OfferChannel::Card,
            discount_type: DiscountType::Flat,
            flat_off: Some(to_paise(800)),
            percent_off: None,
            max_cap: None,
            min_txn: Some(to_paise(10_000)),
            valid_till: ts_utc("2027-01-31T23:59:59+05:30"),
            priority: 80,
        },
        Offer {
            id: "OFF-COUPON-5PCT".to_string(),
            title: "WELCOME5".to_string(),
            provider: "Coupon".to_string(),
            channel: OfferChannel::Coupon,
            discount_type: DiscountType::Percent,
            flat_off: None,
            percent_off: Some(5.0),
            max_cap: Some(to_paise(600)),
            min_txn: Some(to_paise(8_000)),
            valid_till: ts_utc("2027-02-15T23:59:59+05:30"),
            priority: 60,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_shape() {
        let flights = flights();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].base_fare, 1_857_000);
        assert_eq!(flights[0].taxes_and_fees, 443_200);
        assert!(flights.iter().all(|f| f.seats_available == SEED_SEATS));

        let offers = offers();
        assert_eq!(offers.len(), 3);
        // Catalog order matches descending priority for stable ranking ties.
        assert!(offers.windows(2).all(|w| w[0].priority >= w[1].priority));
    }
}
