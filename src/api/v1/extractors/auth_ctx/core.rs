use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::{AuthCtx, CredentialRejected};

/// Handler で、 AuthCtx を受け取るための extractor
///
/// - `AuthCtxExtractor`: 認証必須。token が無い / 不正なら 401
/// - `Option<AuthCtxExtractor>`: token が無ければ None、不正なら 401
///
/// middleware が AuthCtx / CredentialRejected を request.extensions() に insert 済みである前提
pub struct AuthCtxExtractor(pub AuthCtx);

fn resolve(parts: &Parts) -> Result<Option<AuthCtx>, AppError> {
    if let Some(ctx) = parts.extensions.get::<AuthCtx>() {
        return Ok(Some(ctx.clone()));
    }
    if parts.extensions.get::<CredentialRejected>().is_some() {
        return Err(AppError::unauthorized("token invalid"));
    }
    Ok(None)
}

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts)?
            .map(AuthCtxExtractor)
            .ok_or(AppError::unauthorized("token missing"))
    }
}

impl OptionalFromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(resolve(parts)?.map(AuthCtxExtractor))
    }
}
