/*
 * Responsibility
 * - users の契約 (UserRepo trait)
 * - userName の一意性は store 側で保証し、違反は RepoError::Conflict で返す
 * - passwordHash は外に出さない (User は Serialize しない)
 */
use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "userName")]
    pub username: String,
    pub name: String,
    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,
    // ids of the blogs this user owns, ascending
    #[sqlx(rename = "blogIds")]
    pub blogs: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<User>>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    async fn create(&self, new: NewUser) -> RepoResult<User>;
}
