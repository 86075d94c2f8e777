use chrono::{DateTime, Utc};
use tripkart_core::{Cart, Flight, Offer};
use tripkart_shared::DEFAULT_CONVENIENCE_FEE;

/// Offers applicable to a cart, best first. Pure function of its inputs:
/// lapsed offers and offers whose minimum-transaction threshold exceeds the
/// estimated subtotal are dropped, the rest sort by descending priority
/// (stable, so ties keep catalog order).
pub fn eligible_offers(
    cart: &Cart,
    item: Option<&Flight>,
    offers: &[Offer],
    now: DateTime<Utc>,
) -> Vec<Offer> {
    let fee = if cart.convenience_fee > 0 {
        cart.convenience_fee
    } else {
        DEFAULT_CONVENIENCE_FEE
    };
    // Estimate only: the cart may not be priced yet. An itemless cart is
    // judged on its convenience fee alone.
    let subtotal_guess = item.map_or(0, |f| f.base_fare + f.taxes_and_fees) + fee;

    let mut eligible: Vec<Offer> = offers
        .iter()
        .filter(|o| o.is_valid_at(now))
        .filter(|o| o.min_txn_met(subtotal_guess))
        .cloned()
        .collect();
    eligible.sort_by(|a, b| b.priority.cmp(&a.priority));
    eligible
}

/// Head of the eligible ranking, if any offer survives.
pub fn best_offer(
    cart: &Cart,
    item: Option<&Flight>,
    offers: &[Offer],
    now: DateTime<Utc>,
) -> Option<Offer> {
    eligible_offers(cart, item, offers, now).into_iter().next()
}
