/*
 * Responsibility
 * - /blogs 系 CRUD handler + /blogs/stats
 * - Path の {blog_id} は公開 ID → extractor で復号化して内部 ID に変換して受け取る
 * - create/delete は AuthCtx を参照する。削除は owner 本人のみ
 * - update は identity を見ない (誰でも likes を更新できる)
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use tracing::{info, warn};

use crate::{
    api::v1::{
        dto::blogs::{BlogResponse, BlogStatsResponse, CreateBlogRequest, UpdateBlogRequest},
        extractors::{AuthCtxExtractor, PublicBlogId},
    },
    error::AppError,
    repos::{BlogPost, NewPost, error::RepoError},
    services::{blog_stats, id_codec::IdCodec},
    state::AppState,
};

fn to_response(codec: &IdCodec, post: BlogPost) -> Result<BlogResponse, AppError> {
    Ok(BlogResponse {
        id: codec.encode(post.id)?,
        title: post.title,
        author: post.author,
        url: post.url,
        likes: post.likes,
        user: post.owner_id,
    })
}

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let posts = state.posts.list().await?;

    let mut res = Vec::with_capacity(posts.len());
    for post in posts {
        res.push(to_response(&state.id_codec, post)?);
    }

    Ok(Json(res))
}

pub async fn get_blog(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
) -> Result<Json<BlogResponse>, AppError> {
    let post = state
        .posts
        .get(blog_id.id)
        .await?
        .ok_or(AppError::not_found("blog"))?;

    Ok(Json(to_response(&state.id_codec, post)?))
}

pub async fn create_blog(
    State(state): State<AppState>,
    auth: Option<AuthCtxExtractor>,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BlogResponse>), AppError> {
    // Field checks come before any owner lookup.
    let Json(req) = payload?;
    let draft = req.validate().map_err(AppError::validation)?;

    let AuthCtxExtractor(ctx) = auth.ok_or(AppError::unauthorized("token missing"))?;

    let owner = state
        .users
        .get(ctx.user_id)
        .await?
        .ok_or(AppError::unauthorized("user missing or invalid"))?;

    let new = NewPost {
        title: draft.title,
        author: draft.author,
        url: draft.url,
        likes: draft.likes,
        owner_id: owner.id,
    };

    // The owner can disappear between the lookup and the insert.
    let post = state.posts.create(new).await.map_err(|e| match e {
        RepoError::MissingReference => AppError::unauthorized("user missing or invalid"),
        other => other.into(),
    })?;

    info!(blog_id = post.id, owner = %owner.username, "blog created");

    Ok((
        StatusCode::CREATED,
        Json(to_response(&state.id_codec, post)?),
    ))
}

pub async fn update_blog(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
    payload: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> Result<Json<BlogResponse>, AppError> {
    let Json(req) = payload?;
    let changes = req.validate().map_err(AppError::validation)?;

    let post = state
        .posts
        .update(blog_id.id, changes)
        .await?
        .ok_or(AppError::not_found("blog"))?;

    Ok(Json(to_response(&state.id_codec, post)?))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    blog_id: PublicBlogId,
) -> Result<StatusCode, AppError> {
    let caller = state
        .users
        .get(ctx.user_id)
        .await?
        .ok_or(AppError::unauthorized("user missing or invalid"))?;

    let post = state
        .posts
        .get(blog_id.id)
        .await?
        .ok_or(AppError::not_found("blog"))?;

    if post.owner_id != caller.id {
        warn!(
            blog_id = post.id,
            caller = %ctx.username,
            jti = ctx.jti.as_deref().unwrap_or("-"),
            "delete refused: caller is not the owner"
        );
        return Err(AppError::forbidden(
            "only the creator of a blog can delete it",
        ));
    }

    if !state.posts.delete(post.id).await? {
        // deleted concurrently
        return Err(AppError::not_found("blog"));
    }

    info!(
        blog_id = post.id,
        owner = %ctx.username,
        jti = ctx.jti.as_deref().unwrap_or("-"),
        "blog deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<BlogStatsResponse>, AppError> {
    let posts = state.posts.list().await?;
    let stats = blog_stats::summarize(&posts);

    let favorite_blog = stats
        .favorite
        .cloned()
        .map(|post| to_response(&state.id_codec, post))
        .transpose()?;

    Ok(Json(BlogStatsResponse {
        total_likes: stats.total_likes,
        favorite_blog,
        most_blogs: stats.most_prolific_author,
        most_likes: stats.most_liked_author,
    }))
}
