use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tripkart_core::{Cart, Traveller};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest {
    flight_id: String,
}

#[derive(Debug, Deserialize)]
struct TravellersRequest {
    travellers: Vec<Traveller>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplyOfferRequest {
    offer_id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/carts", post(create_cart))
        .route("/carts/{id}", get(get_cart))
        .route("/carts/{id}/items", post(add_item))
        .route("/carts/{id}/travellers", post(add_travellers))
        .route("/carts/{id}/apply-offer", post(apply_offer))
        .route("/carts/{id}/lock", post(lock_cart))
        .route("/carts/{id}/price", get(get_price))
        .route("/carts/{id}/offers", get(get_offers))
}

/// Readers see an expired lock as DRAFT; the stored row is untouched.
fn view(mut cart: Cart) -> Cart {
    cart.status = cart.effective_status(Utc::now());
    cart
}

async fn create_cart(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let cart = state.carts.create_cart().await?;
    Ok(Json(json!({ "cart": cart })))
}

async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let cart = state.carts.get_cart(&id).await?;
    let price = state.carts.price_of(&cart).await?;
    Ok(Json(json!({ "cart": view(cart), "price": price })))
}

async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<Value>, AppError> {
    let (cart, price) = state.carts.add_item(&id, &req.flight_id).await?;
    Ok(Json(json!({ "cart": view(cart), "price": price })))
}

async fn add_travellers(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TravellersRequest>,
) -> Result<Json<Value>, AppError> {
    let cart = state.carts.add_travellers(&id, req.travellers).await?;
    Ok(Json(json!({ "cart": view(cart) })))
}

async fn apply_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ApplyOfferRequest>,
) -> Result<Json<Value>, AppError> {
    let (cart, price) = state.carts.apply_offer(&id, req.offer_id).await?;
    Ok(Json(json!({ "cart": view(cart), "price": price })))
}

async fn lock_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let (cart, price) = state.carts.lock(&id).await?;
    Ok(Json(json!({ "cart": cart, "price": price })))
}

async fn get_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let price = state.carts.price(&id).await?;
    Ok(Json(json!({ "price": price })))
}

async fn get_offers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let (best, eligible) = state.carts.offers_for(&id).await?;
    Ok(Json(json!({ "bestOffer": best, "eligibleOffers": eligible })))
}
