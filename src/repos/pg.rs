/*
 * Responsibility
 * - PostRepo / UserRepo の Postgres 実装 (SQLx)
 * - PgPool を保持し、DB エラーは RepoError::from_sqlx で意味付けして返す
 * - users.blogs は blogs."ownerId" から読み出し時に導出する (非正規化カラムは持たない)
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::post_repo::{BlogPost, NewPost, PostChanges, PostRepo};
use crate::repos::user_repo::{NewUser, User, UserRepo};

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the tables if they do not exist yet.
    pub async fn migrate(&self) -> RepoResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl PostRepo for PgStore {
    async fn list(&self) -> RepoResult<Vec<BlogPost>> {
        let rows = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT "blogId", title, author, url, likes, "ownerId"
            FROM blogs
            ORDER BY "blogId" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT "blogId", title, author, url, likes, "ownerId"
            FROM blogs
            WHERE "blogId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn create(&self, new: NewPost) -> RepoResult<BlogPost> {
        // FK on "ownerId" rejects unknown owners (23503 -> MissingReference)
        let row = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blogs (title, author, url, likes, "ownerId")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING "blogId", title, author, url, likes, "ownerId"
            "#,
        )
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.url)
        .bind(new.likes)
        .bind(new.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(&self, id: i64, changes: PostChanges) -> RepoResult<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blogs
            SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                url = COALESCE($4, url),
                likes = COALESCE($5, likes)
            WHERE "blogId" = $1
            RETURNING "blogId", title, author, url, likes, "ownerId"
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.author)
        .bind(changes.url)
        .bind(changes.likes)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE "blogId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepo for PgStore {
    async fn list(&self) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT
                u."userId", u."userName", u.name, u."passwordHash",
                ARRAY(
                    SELECT b."blogId" FROM blogs b
                    WHERE b."ownerId" = u."userId"
                    ORDER BY b."blogId"
                ) AS "blogIds"
            FROM users u
            ORDER BY u."createdAt" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT
                u."userId", u."userName", u.name, u."passwordHash",
                ARRAY(
                    SELECT b."blogId" FROM blogs b
                    WHERE b."ownerId" = u."userId"
                    ORDER BY b."blogId"
                ) AS "blogIds"
            FROM users u
            WHERE u."userId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT
                u."userId", u."userName", u.name, u."passwordHash",
                ARRAY(
                    SELECT b."blogId" FROM blogs b
                    WHERE b."ownerId" = u."userId"
                    ORDER BY b."blogId"
                ) AS "blogIds"
            FROM users u
            WHERE u."userName" = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn create(&self, new: NewUser) -> RepoResult<User> {
        // unique "userName" -> 23505 -> Conflict
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users ("userId", "userName", name, "passwordHash")
            VALUES ($1, $2, $3, $4)
            RETURNING
                "userId", "userName", name, "passwordHash",
                ARRAY[]::BIGINT[] AS "blogIds"
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.username)
        .bind(&new.name)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }
}
