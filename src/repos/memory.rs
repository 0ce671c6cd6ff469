//! In-memory store.
//!
//! Used when no `DATABASE_URL` is configured and as the fake behind the API tests.
//! Both collections live behind one `RwLock`, so inserting or deleting a post and
//! updating the owner's `blogs` happen under a single write guard.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::post_repo::{BlogPost, NewPost, PostChanges, PostRepo};
use crate::repos::user_repo::{NewUser, User, UserRepo};

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    last_post_id: i64,
    // insertion order == creation order
    posts: Vec<BlogPost>,
    users: Vec<User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepo for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<BlogPost>> {
        Ok(self.inner.read().await.posts.clone())
    }

    async fn get(&self, id: i64) -> RepoResult<Option<BlogPost>> {
        let inner = self.inner.read().await;
        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new: NewPost) -> RepoResult<BlogPost> {
        let mut inner = self.inner.write().await;

        let id = inner.last_post_id + 1;
        let owner = inner
            .users
            .iter_mut()
            .find(|u| u.id == new.owner_id)
            .ok_or(RepoError::MissingReference)?;
        owner.blogs.push(id);

        let post = BlogPost {
            id,
            title: new.title,
            author: new.author,
            url: new.url,
            likes: new.likes,
            owner_id: new.owner_id,
        };
        inner.last_post_id = id;
        inner.posts.push(post.clone());

        Ok(post)
    }

    async fn update(&self, id: i64, changes: PostChanges) -> RepoResult<Option<BlogPost>> {
        let mut inner = self.inner.write().await;
        let Some(post) = inner.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        changes.apply(post);
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.posts.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        let removed = inner.posts.remove(pos);

        if let Some(owner) = inner.users.iter_mut().find(|u| u.id == removed.owner_id) {
            owner.blogs.retain(|blog_id| *blog_id != id);
        }

        Ok(true)
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new: NewUser) -> RepoResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == new.username) {
            return Err(RepoError::Conflict);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            name: new.name,
            password_hash: new.password_hash,
            blogs: Vec::new(),
        };
        inner.users.push(user.clone());

        Ok(user)
    }
}
