use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct SearchParams {
    from: Option<String>,
    to: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/flights/search", get(search_flights))
}

async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    let from = params.from.map(|s| s.trim().to_uppercase());
    let to = params.to.map(|s| s.trim().to_uppercase());
    let flights = state
        .flights
        .search_flights(from.as_deref(), to.as_deref())
        .await
        .map_err(AppError::from)?;
    Ok(Json(json!({ "flights": flights })))
}
