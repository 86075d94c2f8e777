use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::AppError, middleware::auth::Claims, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePaymentRequest {
    cart_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmPaymentRequest {
    payment_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(create_payment))
        .route("/payments/confirm", post(confirm_payment))
}

async fn create_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let payment = state
        .orchestrator
        .create_payment(&claims.sub, &req.cart_id)
        .await?;
    Ok(Json(json!({ "payment": payment })))
}

async fn confirm_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ConfirmPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let payment = state
        .orchestrator
        .confirm_payment(&claims.sub, &req.payment_id)
        .await?;
    Ok(Json(json!({ "payment": payment })))
}
