/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - posts/users: 差し替え可能な store (Postgres / in-memory)
 *   - id_codec, auth, passwords: プロセス単位の service
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{PostRepo, UserRepo};
use crate::services::{auth::AuthService, id_codec::IdCodec, password::PasswordHasher};

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepo>,
    pub users: Arc<dyn UserRepo>,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostRepo>,
        users: Arc<dyn UserRepo>,
        id_codec: IdCodec,
        auth: Arc<AuthService>,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            posts,
            users,
            id_codec,
            auth,
            passwords,
        }
    }
}
