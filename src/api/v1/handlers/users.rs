/*
 * Responsibility
 * - /users 系 handler (登録 / 一覧 / 取得)
 * - Path/Json を extractor で受け、DTO validation → repo/service 呼び出し
 * - users は UUID をそのまま扱う (復号化なし)
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    api::v1::dto::users::{CreateUserRequest, UserResponse},
    error::AppError,
    repos::{NewUser, User, error::RepoError},
    services::id_codec::IdCodec,
    state::AppState,
};

fn to_response(codec: &IdCodec, user: User) -> Result<UserResponse, AppError> {
    Ok(UserResponse {
        blogs: codec.encode_all(&user.blogs)?,
        id: user.id,
        username: user.username,
        name: user.name,
    })
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list().await?;

    let mut res = Vec::with_capacity(users.len());
    for user in users {
        res.push(to_response(&state.id_codec, user)?);
    }

    Ok(Json(res))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .users
        .get(user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(to_response(&state.id_codec, user)?))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(req) = payload?;
    let draft = req.validate().map_err(AppError::validation)?;

    let password_hash = state.passwords.hash(draft.password).await?;

    let user = state
        .users
        .create(NewUser {
            username: draft.username,
            name: draft.name,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::duplicate("username"),
            other => other.into(),
        })?;

    info!(user_id = %user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(to_response(&state.id_codec, user)?),
    ))
}
