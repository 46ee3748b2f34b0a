//! Repository for the `posts` table.

use cradle_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, UpdatePost};

const COLUMNS: &str = "id, slug, title, excerpt, content, status, author_id, published_at, \
    seo_title, seo_description, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct PostRepo;

impl PostRepo {
    /// List posts newest first, optionally filtered by status, with the
    /// total row count for the filter.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Post>, i64), sqlx::Error> {
        let list_query = format!(
            "SELECT {COLUMNS} FROM posts \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Post>(&list_query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE ($1::text IS NULL OR status = $1)")
                .bind(status)
                .fetch_one(pool)
                .await?;

        Ok((rows, total))
    }

    /// Find a post by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a post with `slug` exists, excluding `exclude_id` when given.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Insert a new post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: Option<DbId>,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts \
                (slug, title, excerpt, content, status, author_id, published_at, \
                 seo_title, seo_description) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'), $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.status)
            .bind(author_id)
            .bind(input.published_at)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .fetch_one(pool)
            .await
    }

    /// Update a post. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                slug = COALESCE($2, slug), \
                title = COALESCE($3, title), \
                excerpt = COALESCE($4, excerpt), \
                content = COALESCE($5, content), \
                status = COALESCE($6, status), \
                published_at = COALESCE($7, published_at), \
                seo_title = COALESCE($8, seo_title), \
                seo_description = COALESCE($9, seo_description), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.status)
            .bind(input.published_at)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a post. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
