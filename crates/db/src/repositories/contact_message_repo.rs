//! Repository for the `contact_messages` table.

use folio_core::types::DbId;
use folio_core::validation::ContactSubmission;
use sqlx::{PgExecutor, PgPool};

use crate::models::contact_message::{ContactMessage, SubmissionMeta};

const COLUMNS: &str = "\
    id, name, email, phone, subject, message, budget, timeline, \
    is_read, ip_address, user_agent, created_at";

/// Persists visitor messages and serves the admin inbox.
pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Store a validated, normalized submission as an unread message.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &ContactSubmission,
        meta: &SubmissionMeta,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages
                (name, email, phone, subject, message, budget, timeline, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(&input.budget)
            .bind(&input.timeline)
            .bind(&meta.ip_address)
            .bind(&meta.user_agent)
            .fetch_one(executor)
            .await
    }

    /// Store a submission unless its source address already sent `limit`
    /// messages within the last `window_mins` minutes.
    ///
    /// Returns `None` when the limit is reached. The check and the insert
    /// run in one transaction holding an advisory lock keyed on the address,
    /// so concurrent submissions from one source are counted one at a time.
    /// Submissions without an address are stored unconditionally.
    pub async fn create_within_limit(
        pool: &PgPool,
        input: &ContactSubmission,
        meta: &SubmissionMeta,
        limit: i64,
        window_mins: i64,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let Some(ip) = meta.ip_address.as_deref() else {
            return Self::create(pool, input, meta).await.map(Some);
        };

        let mut tx = pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext('contact:' || $1))")
            .bind(ip)
            .execute(&mut *tx)
            .await?;

        let recent = Self::count_recent_from_ip(&mut *tx, ip, window_mins).await?;
        if recent >= limit {
            return Ok(None);
        }

        let message = Self::create(&mut *tx, input, meta).await?;
        tx.commit().await?;
        Ok(Some(message))
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_messages WHERE id = $1");
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Messages received from `ip_address` within the last `window_mins` minutes.
    pub async fn count_recent_from_ip<'e>(
        executor: impl PgExecutor<'e>,
        ip_address: &str,
        window_mins: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM contact_messages \
             WHERE ip_address = $1 AND created_at > NOW() - make_interval(mins => $2::int)",
        )
        .bind(ip_address)
        .bind(window_mins)
        .fetch_one(executor)
        .await
    }

    /// List messages newest first, optionally only unread ones.
    pub async fn list(
        pool: &PgPool,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_messages \
             WHERE (NOT $1 OR NOT is_read) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(unread_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, unread_only: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE (NOT $1 OR NOT is_read)")
            .bind(unread_only)
            .fetch_one(pool)
            .await
    }

    /// Set the read flag. This is the only mutation a message supports.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        is_read: bool,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query =
            format!("UPDATE contact_messages SET is_read = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .bind(is_read)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
