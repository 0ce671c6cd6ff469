/*
 * Responsibility
 * - Blogs の request/response DTO
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 * - request の必須項目チェックは validate() で行い、owner の lookup より先に実行する
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::PostChanges;
use crate::services::blog_stats::{AuthorLikes, AuthorPostCount};

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// A create request that passed validation; only the owner is still missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
}

fn required(value: Option<String>, missing: &'static str) -> Result<String, &'static str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing),
    }
}

/// Upper bound for a single post's likes, so sums over the collection stay in `i64`.
pub const MAX_LIKES: i64 = u32::MAX as i64;

fn check_likes(likes: i64) -> Result<i64, &'static str> {
    if likes < 0 {
        return Err("likes must be a non-negative integer");
    }
    if likes > MAX_LIKES {
        return Err("likes is too large");
    }
    Ok(likes)
}

impl CreateBlogRequest {
    pub fn validate(self) -> Result<BlogDraft, &'static str> {
        let title = required(self.title, "title is required")?;
        let author = required(self.author, "author is required")?;
        let url = required(self.url, "url is required")?;
        let likes = check_likes(self.likes.unwrap_or(0))?;

        Ok(BlogDraft {
            title,
            author,
            url,
            likes,
        })
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl UpdateBlogRequest {
    pub fn validate(self) -> Result<PostChanges, &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(author) = &self.author
            && author.trim().is_empty()
        {
            return Err("author cannot be empty");
        }
        if let Some(url) = &self.url
            && url.trim().is_empty()
        {
            return Err("url cannot be empty");
        }
        let likes = self.likes.map(check_likes).transpose()?;

        Ok(PostChanges {
            title: self.title,
            author: self.author,
            url: self.url,
            likes,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: String, // encoded
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user: Uuid, // owner (users.userId)
}

#[derive(Debug, Serialize)]
pub struct BlogStatsResponse {
    pub total_likes: i64,
    pub favorite_blog: Option<BlogResponse>,
    pub most_blogs: Option<AuthorPostCount>,
    pub most_likes: Option<AuthorLikes>,
}
