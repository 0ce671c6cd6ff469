/*
 * Responsibility
 * - POST /login: username/password を検証して access token を発行する
 * - 「ユーザーが居ない」と「パスワード違い」は同じ 401 にする (存在を漏らさない)
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{info, warn};

use crate::{
    api::v1::dto::login::{LoginRequest, LoginResponse},
    error::AppError,
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "invalid username or password";

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;

    let Some(user) = state.users.find_by_username(&req.username).await? else {
        warn!(username = %req.username, "login failed: unknown user");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    let password_ok = state
        .passwords
        .verify(req.password, user.password_hash.clone())
        .await?;
    if !password_ok {
        warn!(username = %user.username, "login failed: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let issued = state.auth.issue(user.id, &user.username)?;
    info!(user_id = %user.id, "login succeeded");

    Ok(Json(LoginResponse {
        token: issued.access_token,
        token_type: issued.token_type,
        expires_in: issued.expires_in,
        username: user.username,
        name: user.name,
    }))
}
