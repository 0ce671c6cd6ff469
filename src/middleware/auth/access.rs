//! Bearer access token (JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` があれば検証し、成功なら `AuthCtx` を格納する。
//! - 検証に失敗したら `CredentialRejected` を格納する (ここでは拒否しない)。
//! - ヘッダが無い / Bearer 以外なら何も格納しない (匿名)。
//!
//! 401 を返すかどうかは identity を必要とする handler (extractor) 側で決める。
//! そのため list / update など identity を見ない route は token の有無に影響されない。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::{AuthCtx, CredentialRejected};
use crate::state::AppState;

/// `/api/v1/*` に認証情報の解決を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes(state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match state.auth.verify_verified(token) {
            Ok(verified) => {
                let auth_ctx = AuthCtx::new(verified.user_id, verified.username, verified.jti);
                // middleware → extractor への受け渡し
                req.extensions_mut().insert(auth_ctx);
            }
            Err(err) => {
                tracing::warn!(error = %err, "access token verification failed");
                req.extensions_mut().insert(CredentialRejected);
            }
        }
    }

    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
