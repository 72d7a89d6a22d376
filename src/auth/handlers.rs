use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        jwt::JwtKeys,
        services::{login_user, register_user},
    },
    error::{json_body, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<RegisterResponse>> {
    let payload = json_body(payload)?;
    let user_id = register_user(&state.db, &payload).await?;

    info!(user_id, username = %payload.username, "user registered");
    Ok(Json(RegisterResponse {
        user_id,
        message: "Registration successful".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let payload = json_body(payload)?;
    let keys = JwtKeys::from_ref(&state);
    let res = login_user(&state.db, &keys, &payload).await?;

    info!(user_id = res.user.user_id, "user logged in");
    Ok(Json(res))
}
