//! Repository for the `blog_comments` table.

use folio_core::types::DbId;
use folio_core::validation::CommentSubmission;
use sqlx::PgPool;

use crate::models::blog_comment::{ApprovalChange, BlogComment};

const COLUMNS: &str = "\
    id, post_id, parent_id, name, email, website, body, is_approved, \
    ip_address, created_at, updated_at";

/// Comment intake for visitors and the moderation queue for the admin.
pub struct BlogCommentRepo;

impl BlogCommentRepo {
    /// Store a validated, normalized comment on `post_id`.
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        input: &CommentSubmission,
        is_approved: bool,
        ip_address: Option<&str>,
    ) -> Result<BlogComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_comments
                (post_id, parent_id, name, email, website, body, is_approved, ip_address)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogComment>(&query)
            .bind(post_id)
            .bind(input.parent_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.website)
            .bind(&input.body)
            .bind(is_approved)
            .bind(ip_address)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_comments WHERE id = $1");
        sqlx::query_as::<_, BlogComment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approved comments on a post, oldest first.
    pub async fn list_approved_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<BlogComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_comments \
             WHERE post_id = $1 AND is_approved \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, BlogComment>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Moderation listing, newest first, optionally only pending comments.
    pub async fn list(
        pool: &PgPool,
        pending_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_comments \
             WHERE (NOT $1 OR NOT is_approved) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, BlogComment>(&query)
            .bind(pending_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, pending_only: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM blog_comments WHERE (NOT $1 OR NOT is_approved)",
        )
        .bind(pending_only)
        .fetch_one(pool)
        .await
    }

    /// Approve or hide a comment and report whether it was approved before.
    ///
    /// The previous flag is read under `FOR UPDATE`, so two concurrent
    /// approvals see exactly one `false -> true` transition.
    pub async fn set_approved(
        pool: &PgPool,
        id: DbId,
        is_approved: bool,
    ) -> Result<Option<ApprovalChange>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_comments SET is_approved = $2
             FROM (
                 SELECT id AS prior_id, is_approved AS prior_approved
                 FROM blog_comments WHERE id = $1 FOR UPDATE
             ) prior
             WHERE blog_comments.id = prior.prior_id
             RETURNING {COLUMNS}, prior.prior_approved AS was_approved"
        );
        sqlx::query_as::<_, ApprovalChange>(&query)
            .bind(id)
            .bind(is_approved)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment and its replies. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
