use tripkart_core::{Cart, DiscountType, Flight, Offer, PriceBreakdown};
use tripkart_shared::money::{format_inr, percent_of};
use tripkart_shared::DEFAULT_CONVENIENCE_FEE;

/// Deterministic price breakdown for a cart against the offer catalog.
///
/// Pure and total: a cart with no item prices to zero, an applied offer that
/// does not resolve or whose minimum-transaction threshold is unmet simply
/// contributes no discount. All arithmetic is integer paise.
pub fn compute_price(cart: &Cart, item: Option<&Flight>, offers: &[Offer]) -> PriceBreakdown {
    let Some(item) = item else {
        return PriceBreakdown::zero();
    };

    let base_fare = item.base_fare;
    let taxes_and_fees = item.taxes_and_fees;

    // MVP fee policy: flat ₹249; a cart with no fee set falls back to it.
    let convenience_fee = if cart.convenience_fee > 0 {
        cart.convenience_fee
    } else {
        DEFAULT_CONVENIENCE_FEE
    };

    let subtotal = base_fare + taxes_and_fees + convenience_fee;

    let mut discount = 0;
    let mut savings_label = None;

    if let Some(offer_id) = &cart.applied_offer_id {
        if let Some(offer) = offers.iter().find(|o| &o.id == offer_id) {
            if offer.min_txn_met(subtotal) {
                discount = match offer.discount_type {
                    DiscountType::Flat => offer.flat_off.unwrap_or(0),
                    DiscountType::Percent => {
                        percent_of(subtotal, offer.percent_off.unwrap_or(0.0))
                    }
                };
                if let Some(cap) = offer.max_cap {
                    discount = discount.min(cap);
                }
                // A discount never exceeds what is being discounted.
                discount = discount.min(subtotal);
                if discount > 0 {
                    savings_label = Some(format!("Saved {}", format_inr(discount)));
                }
            }
        }
    }

    let total_payable = (subtotal - discount).max(0);

    PriceBreakdown {
        base_fare,
        taxes_and_fees,
        convenience_fee,
        discount,
        subtotal,
        total_payable,
        savings_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use tripkart_core::OfferChannel;

    fn flight(base_fare: i64, taxes_and_fees: i64) -> Flight {
        let t = DateTime::parse_from_rfc3339("2026-01-03T06:10:00+05:30").unwrap();
        Flight {
            id: "FL-TEST".to_string(),
            from: "GOI".to_string(),
            to: "CCU".to_string(),
            depart_time: t,
            arrive_time: t,
            airline: "TestAir".to_string(),
            flight_no: "TA-1".to_string(),
            duration_mins: 185,
            base_fare,
            taxes_and_fees,
            seats_available: 6,
        }
    }

    fn percent_offer(percent_off: f64, max_cap: Option<i64>, min_txn: Option<i64>) -> Offer {
        Offer {
            id: "OFF-PCT".to_string(),
            title: "Percent".to_string(),
            provider: "Coupon".to_string(),
            channel: OfferChannel::Coupon,
            discount_type: DiscountType::Percent,
            flat_off: None,
            percent_off: Some(percent_off),
            max_cap,
            min_txn,
            valid_till: Utc::now(),
            priority: 0,
        }
    }

    fn flat_offer(flat_off: i64, min_txn: Option<i64>) -> Offer {
        Offer {
            id: "OFF-FLAT".to_string(),
            title: "Flat".to_string(),
            provider: "HDFC".to_string(),
            channel: OfferChannel::Upi,
            discount_type: DiscountType::Flat,
            flat_off: Some(flat_off),
            percent_off: None,
            max_cap: None,
            min_txn,
            valid_till: Utc::now(),
            priority: 0,
        }
    }

    #[test]
    fn test_empty_cart_prices_to_zero() {
        let cart = Cart::new(24_900);
        let price = compute_price(&cart, None, &[]);
        assert_eq!(price, PriceBreakdown::zero());
    }

    #[test]
    fn test_subtotal_and_default_fee() {
        let mut cart = Cart::new(0);
        cart.item = Some("FL-TEST".to_string());
        let f = flight(1_857_000, 443_200);
        let price = compute_price(&cart, Some(&f), &[]);
        assert_eq!(price.convenience_fee, 24_900);
        assert_eq!(price.subtotal, 1_857_000 + 443_200 + 24_900);
        assert_eq!(price.discount, 0);
        assert_eq!(price.total_payable, price.subtotal);
        assert!(price.savings_label.is_none());
    }

    #[test]
    fn test_percent_discount_hits_cap() {
        // subtotal 20000: base 10000 + taxes 5000 + fee 5000
        let mut cart = Cart::new(5_000);
        cart.item = Some("FL-TEST".to_string());
        cart.applied_offer_id = Some("OFF-PCT".to_string());
        let f = flight(10_000, 5_000);
        let offers = vec![percent_offer(5.0, Some(600), None)];

        let price = compute_price(&cart, Some(&f), &offers);
        // round(20000 * 5 / 100) = 1000, capped at 600
        assert_eq!(price.discount, 600);
        assert_eq!(price.total_payable, 19_400);
        assert_eq!(price.savings_label.as_deref(), Some("Saved \u{20B9}6"));
    }

    #[test]
    fn test_flat_discount_blocked_by_min_txn() {
        // subtotal 9000 < min_txn 10000 -> no discount, not an error
        let mut cart = Cart::new(1_000);
        cart.item = Some("FL-TEST".to_string());
        cart.applied_offer_id = Some("OFF-FLAT".to_string());
        let f = flight(6_000, 2_000);
        let offers = vec![flat_offer(1_200, Some(10_000))];

        let price = compute_price(&cart, Some(&f), &offers);
        assert_eq!(price.subtotal, 9_000);
        assert_eq!(price.discount, 0);
        assert_eq!(price.total_payable, 9_000);
        assert!(price.savings_label.is_none());
    }

    #[test]
    fn test_unknown_applied_offer_is_silently_ignored() {
        let mut cart = Cart::new(24_900);
        cart.item = Some("FL-TEST".to_string());
        cart.applied_offer_id = Some("OFF-DOES-NOT-EXIST".to_string());
        let f = flight(1_000_000, 100_000);

        let price = compute_price(&cart, Some(&f), &[flat_offer(1_200, None)]);
        assert_eq!(price.discount, 0);
    }

    #[test]
    fn test_discount_clamped_to_subtotal() {
        let mut cart = Cart::new(1_000);
        cart.item = Some("FL-TEST".to_string());
        cart.applied_offer_id = Some("OFF-FLAT".to_string());
        let f = flight(2_000, 1_000);
        let offers = vec![flat_offer(1_000_000, None)];

        let price = compute_price(&cart, Some(&f), &offers);
        assert_eq!(price.subtotal, 4_000);
        assert_eq!(price.discount, 4_000);
        assert_eq!(price.total_payable, 0);
    }
}
