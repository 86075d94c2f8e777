use std::sync::Arc;

use chrono::{Duration, Utc};
use tripkart_catalog::compute_price;
use tripkart_core::repository::{CartRepository, FlightRepository, OfferRepository};
use tripkart_core::{Cart, Flight, Offer, PriceBreakdown, Traveller};
use tripkart_offer::{best_offer, eligible_offers};
use tripkart_shared::Paise;

use crate::OrderError;

/// Owns the cart lifecycle: DRAFT -> LOCKED -> BOOKED. Every mutating entry
/// point re-evaluates lock expiry; the seat-lock protocol itself runs as one
/// transaction inside the cart repository.
pub struct CartManager {
    carts: Arc<dyn CartRepository>,
    flights: Arc<dyn FlightRepository>,
    offers: Arc<dyn OfferRepository>,
    convenience_fee: Paise,
    lock_ttl: Duration,
}

impl CartManager {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        flights: Arc<dyn FlightRepository>,
        offers: Arc<dyn OfferRepository>,
        convenience_fee: Paise,
        lock_ttl: Duration,
    ) -> Self {
        Self {
            carts,
            flights,
            offers,
            convenience_fee,
            lock_ttl,
        }
    }

    pub async fn create_cart(&self) -> Result<Cart, OrderError> {
        let cart = self.carts.create_cart(Cart::new(self.convenience_fee)).await?;
        tracing::debug!(cart = %cart.id, "cart created");
        Ok(cart)
    }

    pub async fn get_cart(&self, id: &str) -> Result<Cart, OrderError> {
        self.carts
            .get_cart(id)
            .await?
            .ok_or_else(|| OrderError::NotFound("Cart not found".to_string()))
    }

    /// Replace the single item slot. Works in any status; inventory is not
    /// touched until `lock`.
    pub async fn add_item(
        &self,
        cart_id: &str,
        flight_id: &str,
    ) -> Result<(Cart, PriceBreakdown), OrderError> {
        self.get_cart(cart_id).await?;
        if self.flights.get_flight(flight_id).await?.is_none() {
            return Err(OrderError::Validation("Invalid flightId".to_string()));
        }
        let cart = self.carts.set_item(cart_id, flight_id).await?;
        let price = self.price_of(&cart).await?;
        Ok((cart, price))
    }

    /// Wholesale replacement of the traveller list; no incremental merge.
    pub async fn add_travellers(
        &self,
        cart_id: &str,
        travellers: Vec<Traveller>,
    ) -> Result<Cart, OrderError> {
        self.get_cart(cart_id).await?;
        if travellers
            .iter()
            .any(|t| t.first_name.trim().is_empty() || t.last_name.trim().is_empty())
        {
            return Err(OrderError::Validation(
                "Traveller names are required".to_string(),
            ));
        }
        Ok(self.carts.replace_travellers(cart_id, travellers).await?)
    }

    /// Set or clear the applied offer. A non-empty id must resolve.
    pub async fn apply_offer(
        &self,
        cart_id: &str,
        offer_id: Option<String>,
    ) -> Result<(Cart, PriceBreakdown), OrderError> {
        self.get_cart(cart_id).await?;
        if let Some(id) = &offer_id {
            if self.offers.get_offer(id).await?.is_none() {
                return Err(OrderError::Validation("Invalid offerId".to_string()));
            }
        }
        let cart = self.carts.set_applied_offer(cart_id, offer_id).await?;
        let price = self.price_of(&cart).await?;
        Ok((cart, price))
    }

    /// The seat-reservation protocol. Idempotent while the lock is active;
    /// an expired lock is released and re-acquired atomically; NO_SEATS
    /// surfaces as a conflict with zero side effects.
    pub async fn lock(&self, cart_id: &str) -> Result<(Cart, PriceBreakdown), OrderError> {
        let cart = self.get_cart(cart_id).await?;
        if cart.item.is_none() {
            return Err(OrderError::Validation("Cart has no flight".to_string()));
        }
        let cart = self.carts.lock_cart(cart_id, Utc::now(), self.lock_ttl).await?;
        let price = self.price_of(&cart).await?;
        Ok((cart, price))
    }

    pub async fn price(&self, cart_id: &str) -> Result<PriceBreakdown, OrderError> {
        let cart = self.get_cart(cart_id).await?;
        self.price_of(&cart).await
    }

    /// Best offer plus the full eligible ranking for a cart.
    pub async fn offers_for(
        &self,
        cart_id: &str,
    ) -> Result<(Option<Offer>, Vec<Offer>), OrderError> {
        let cart = self.get_cart(cart_id).await?;
        let item = self.item_of(&cart).await?;
        let offers = self.offers.list_offers().await?;
        let now = Utc::now();
        let eligible = eligible_offers(&cart, item.as_ref(), &offers, now);
        let best = best_offer(&cart, item.as_ref(), &offers, now);
        Ok((best, eligible))
    }

    /// Resolve the cart's item reference to its flight, if set.
    pub async fn item_of(&self, cart: &Cart) -> Result<Option<Flight>, OrderError> {
        match &cart.item {
            Some(flight_id) => Ok(self.flights.get_flight(flight_id).await?),
            None => Ok(None),
        }
    }

    /// Recompute the breakdown from current cart + catalog state.
    pub async fn price_of(&self, cart: &Cart) -> Result<PriceBreakdown, OrderError> {
        let item = self.item_of(cart).await?;
        let offers = self.offers.list_offers().await?;
        Ok(compute_price(cart, item.as_ref(), &offers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderError;
    use tripkart_catalog::seed;
    use tripkart_core::{CartStatus, Gender};
    use tripkart_store::MemStore;

    fn manager() -> CartManager {
        let store = Arc::new(MemStore::seeded(seed::flights(), seed::offers()));
        CartManager::new(
            store.clone(),
            store.clone(),
            store,
            24_900,
            Duration::minutes(15),
        )
    }

    fn traveller(first: &str, last: &str) -> Traveller {
        Traveller {
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender: Gender::Male,
        }
    }

    #[tokio::test]
    async fn test_add_item_rejects_unknown_flight() {
        let mgr = manager();
        let cart = mgr.create_cart().await.unwrap();
        let err = mgr.add_item(&cart.id, "FL-NOPE").await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_item_prices_the_cart() {
        let mgr = manager();
        let cart = mgr.create_cart().await.unwrap();
        let (cart, price) = mgr.add_item(&cart.id, "FL-INDIGO-0610").await.unwrap();
        assert_eq!(cart.item.as_deref(), Some("FL-INDIGO-0610"));
        assert_eq!(price.subtotal, 1_857_000 + 443_200 + 24_900);
    }

    #[tokio::test]
    async fn test_travellers_are_replaced_wholesale() {
        let mgr = manager();
        let cart = mgr.create_cart().await.unwrap();
        let cart = mgr
            .add_travellers(&cart.id, vec![traveller("A", "B"), traveller("C", "D")])
            .await
            .unwrap();
        assert_eq!(cart.travellers.len(), 2);

        let cart = mgr
            .add_travellers(&cart.id, vec![traveller("E", "F")])
            .await
            .unwrap();
        assert_eq!(cart.travellers.len(), 1);
        assert_eq!(cart.travellers[0].first_name, "E");

        let err = mgr
            .add_travellers(&cart.id, vec![traveller("", "X")])
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_apply_offer_validates_and_clears() {
        let mgr = manager();
        let cart = mgr.create_cart().await.unwrap();
        mgr.add_item(&cart.id, "FL-INDIGO-0610").await.unwrap();

        let err = mgr
            .apply_offer(&cart.id, Some("OFF-NOPE".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));

        let (cart, price) = mgr
            .apply_offer(&cart.id, Some("OFF-HDFC-UPI-1200".to_string()))
            .await
            .unwrap();
        assert_eq!(cart.applied_offer_id.as_deref(), Some("OFF-HDFC-UPI-1200"));
        assert_eq!(price.discount, 120_000);

        let (cart, price) = mgr.apply_offer(&cart.id, None).await.unwrap();
        assert_eq!(cart.applied_offer_id, None);
        assert_eq!(price.discount, 0);
    }

    #[tokio::test]
    async fn test_lock_requires_an_item() {
        let mgr = manager();
        let cart = mgr.create_cart().await.unwrap();
        let err = mgr.lock(&cart.id).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_lock_is_idempotent_with_identical_price() {
        let mgr = manager();
        let cart = mgr.create_cart().await.unwrap();
        mgr.add_item(&cart.id, "FL-INDIGO-0610").await.unwrap();

        let (first, first_price) = mgr.lock(&cart.id).await.unwrap();
        assert_eq!(first.status, CartStatus::Locked);
        let (second, second_price) = mgr.lock(&cart.id).await.unwrap();
        assert_eq!(second.lock_expires_at, first.lock_expires_at);
        assert_eq!(second_price, first_price);
    }

    #[tokio::test]
    async fn test_best_offer_ranking_for_cart() {
        let mgr = manager();
        let cart = mgr.create_cart().await.unwrap();
        mgr.add_item(&cart.id, "FL-INDIGO-0610").await.unwrap();

        let (best, eligible) = mgr.offers_for(&cart.id).await.unwrap();
        // Subtotal comfortably clears every seed threshold; highest priority wins.
        assert_eq!(best.map(|o| o.id).as_deref(), Some("OFF-HDFC-UPI-1200"));
        assert_eq!(eligible.len(), 3);
    }
}
