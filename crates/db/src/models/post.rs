//! Blog post model and DTOs.

use cradle_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub status: String,
    pub author_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a post. Slug uniqueness is checked by the handler
/// before insert; the `uq_posts_slug` constraint is the race backstop.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<Timestamp>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

/// DTO for partially updating a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePost {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<Timestamp>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}
