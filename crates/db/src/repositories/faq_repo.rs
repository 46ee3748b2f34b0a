//! Repository for the `faqs` table.

use cradle_core::types::DbId;
use sqlx::PgPool;

use crate::models::faq::{CreateFaq, Faq, UpdateFaq};

const COLUMNS: &str =
    "id, question, answer, category, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for FAQ entries.
pub struct FaqRepo;

impl FaqRepo {
    /// List FAQ entries ordered by `sort_order`, optionally including
    /// inactive ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Faq>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM faqs ORDER BY sort_order ASC, id ASC")
        } else {
            format!(
                "SELECT {COLUMNS} FROM faqs WHERE is_active = true \
                 ORDER BY sort_order ASC, id ASC"
            )
        };
        sqlx::query_as::<_, Faq>(&query).fetch_all(pool).await
    }

    /// Find an FAQ entry by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faqs WHERE id = $1");
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new FAQ entry.
    pub async fn create(pool: &PgPool, input: &CreateFaq) -> Result<Faq, sqlx::Error> {
        let query = format!(
            "INSERT INTO faqs (question, answer, category, sort_order, is_active) \
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Update an FAQ entry. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFaq,
    ) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!(
            "UPDATE faqs SET \
                question = COALESCE($2, question), \
                answer = COALESCE($3, answer), \
                category = COALESCE($4, category), \
                sort_order = COALESCE($5, sort_order), \
                is_active = COALESCE($6, is_active), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an FAQ entry. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
