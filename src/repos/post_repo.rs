/*
 * Responsibility
 * - blogs CRUD の契約 (PostRepo trait)
 * - store 実装間で共有する BlogPost 型
 * - ownerId は作成時に固定され、以後書き換えない
 */
use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BlogPost {
    #[sqlx(rename = "blogId")]
    pub id: i64,

    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,

    #[sqlx(rename = "ownerId")]
    pub owner_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub owner_id: Uuid,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl PostChanges {
    pub fn apply(self, post: &mut BlogPost) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(url) = self.url {
            post.url = url;
        }
        if let Some(likes) = self.likes {
            post.likes = likes;
        }
    }
}

#[async_trait]
pub trait PostRepo: Send + Sync {
    /// All posts in creation order.
    async fn list(&self) -> RepoResult<Vec<BlogPost>>;

    async fn get(&self, id: i64) -> RepoResult<Option<BlogPost>>;

    /// Inserts the post and records it in the owner's `blogs`.
    ///
    /// Fails with `RepoError::MissingReference` if the owner does not exist.
    async fn create(&self, new: NewPost) -> RepoResult<BlogPost>;

    async fn update(&self, id: i64, changes: PostChanges) -> RepoResult<Option<BlogPost>>;

    /// Removes the post and its back-reference. Returns false if nothing was deleted.
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}
