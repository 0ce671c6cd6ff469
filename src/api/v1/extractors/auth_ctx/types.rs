/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - 所有者チェック (owner のみ削除可) は handler 側で user_id を使って行う
 */

use uuid::Uuid;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token の `sub` (users."userId")
/// - `username` はログ相関用 (権限判定には使わない)
/// - `jti` は監査/相関用
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub username: String,
    pub jti: Option<String>,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, username: String, jti: Option<String>) -> Self {
        Self {
            user_id,
            username,
            jti,
        }
    }
}

/// Bearer token は提示されたが検証に失敗した、という印
#[derive(Debug, Clone, Copy)]
pub struct CredentialRejected;
