/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /blogs, /users, /login
 * - 認証情報の解決 (access middleware) は v1 全体に掛け、要否は handler の extractor で決める
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{
    blogs::{blog_stats, create_blog, delete_blog, get_blog, list_blogs, update_blog},
    health::health,
    login::login,
    users::{create_user, get_user, list_users},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/blogs", get(list_blogs).post(create_blog))
        // static segment wins over {blog_id}
        .route("/blogs/stats", get(blog_stats))
        .route(
            "/blogs/{blog_id}",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route("/login", post(login));

    access::apply(router, state)
}
