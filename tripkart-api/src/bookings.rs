use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::AppError, middleware::auth::Claims, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookingRequest {
    cart_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/{id}", get(get_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let booking = state
        .orchestrator
        .create_booking(&claims.sub, &req.cart_id)
        .await?;
    Ok(Json(json!({ "booking": booking })))
}

async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, AppError> {
    let bookings = state.orchestrator.list_bookings(&claims.sub).await?;
    Ok(Json(json!({ "bookings": bookings })))
}

async fn get_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking = state.orchestrator.get_booking(&claims.sub, &id).await?;
    Ok(Json(json!({ "booking": booking })))
}
