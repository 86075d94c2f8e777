use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{extract::State, routing::post, Extension, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Deserialize;
use serde_json::{json, Value};
use tripkart_core::User;

use crate::{error::AppError, middleware::auth::Claims, state::AppState};

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: String,
    password: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    name: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn mint_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::Anyhow(anyhow::anyhow!("Token encoding failed: {}", e)))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    if req.email.trim().is_empty() || req.password.len() < 6 {
        return Err(AppError::ValidationError(
            "Email and a password of at least 6 characters are required".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Anyhow(anyhow::anyhow!("Password hashing failed: {}", e)))?
        .to_string();

    let user = state
        .users
        .create_user(User::new(req.email.trim(), req.name, password_hash))
        .await
        .map_err(AppError::from)?;

    let token = mint_token(&state, &user)?;
    tracing::info!(user = %user.id, "user registered");
    Ok(Json(json!({ "token": token, "user": user })))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let user = state
        .users
        .find_by_email(req.email.trim())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    let parsed = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Anyhow(anyhow::anyhow!("Stored hash is invalid: {}", e)))?;
    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed)
        .map_err(|_| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    let token = mint_token(&state, &user)?;
    Ok(Json(json!({ "token": token, "user": user })))
}

/// GET /me for the authenticated routes; claims come from the middleware.
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, AppError> {
    let user = state
        .users
        .get_user(&claims.sub)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))?;
    Ok(Json(json!({ "user": user })))
}

/// PATCH /me. An omitted name clears the stored one, matching the web
/// client's profile form.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::ValidationError("Name must not be empty".to_string()));
    }
    let user = state
        .users
        .update_name(&claims.sub, req.name)
        .await
        .map_err(AppError::from)?;
    Ok(Json(json!({ "user": user })))
}
