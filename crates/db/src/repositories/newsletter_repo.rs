//! Repository for the `newsletter_subscribers` table.
//!
//! Emails are stored lowercase (enforced by a `CHECK`), so the unique
//! constraint on `email` is case-insensitive in effect. Callers pass
//! addresses through [`normalize_email`] first; the repository does it again
//! so no path can store a mixed-case address.

use folio_core::types::DbId;
use folio_core::validation::normalize_email;
use sqlx::PgPool;

use crate::models::newsletter::{NewsletterSubscriber, SubscribeOutcome, SubscribeRow};

const COLUMNS: &str = "\
    id, email, name, is_active, is_verified, verification_token, subscribed_at, \
    unsubscribed_at, ip_address, source, created_at, updated_at";

/// Fields for a subscribe attempt.
#[derive(Debug, Clone, Default)]
pub struct SubscribeParams<'a> {
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub source: Option<&'a str>,
    pub ip_address: Option<&'a str>,
    /// Token to store if the row is created or reactivated.
    pub verification_token: &'a str,
}

/// Subscription lifecycle and admin listing.
pub struct NewsletterRepo;

impl NewsletterRepo {
    /// Subscribe an address and report what happened.
    ///
    /// - no row: insert an active subscriber ([`SubscribeOutcome::Created`])
    /// - inactive row: reactivate it with a fresh token
    ///   ([`SubscribeOutcome::Reactivated`])
    /// - active row: leave it as is ([`SubscribeOutcome::AlreadySubscribed`])
    ///
    /// The `DO UPDATE ... WHERE` is evaluated against the row version the
    /// conflict locked, so among concurrent calls for one address at most
    /// one observes `Created` or `Reactivated`.
    pub async fn subscribe(
        pool: &PgPool,
        params: &SubscribeParams<'_>,
    ) -> Result<(NewsletterSubscriber, SubscribeOutcome), sqlx::Error> {
        let email = normalize_email(params.email);
        let query = format!(
            "INSERT INTO newsletter_subscribers
                 (email, name, source, ip_address, verification_token)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (email) DO UPDATE SET
                 is_active = TRUE,
                 unsubscribed_at = NULL,
                 subscribed_at = NOW(),
                 name = COALESCE(EXCLUDED.name, newsletter_subscribers.name),
                 verification_token = EXCLUDED.verification_token
             WHERE NOT newsletter_subscribers.is_active
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let changed = sqlx::query_as::<_, SubscribeRow>(&query)
            .bind(&email)
            .bind(params.name)
            .bind(params.source)
            .bind(params.ip_address)
            .bind(params.verification_token)
            .fetch_optional(pool)
            .await?;

        if let Some(row) = changed {
            let outcome = row.outcome();
            return Ok((row.subscriber, outcome));
        }

        // Already active: the conflict update was skipped.
        let existing = Self::find_by_email(pool, &email)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok((existing, SubscribeOutcome::AlreadySubscribed))
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM newsletter_subscribers WHERE email = $1");
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .bind(normalize_email(email))
            .fetch_optional(pool)
            .await
    }

    /// Mark the subscriber holding `token` as verified and consume the token.
    pub async fn verify(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<NewsletterSubscriber>, sqlx::Error> {
        let query = format!(
            "UPDATE newsletter_subscribers \
             SET is_verified = TRUE, verification_token = NULL \
             WHERE verification_token = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a subscriber. Unsubscribing twice keeps the first timestamp.
    pub async fn unsubscribe(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, sqlx::Error> {
        let query = format!(
            "UPDATE newsletter_subscribers \
             SET is_active = FALSE, unsubscribed_at = COALESCE(unsubscribed_at, NOW()) \
             WHERE email = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .bind(normalize_email(email))
            .fetch_optional(pool)
            .await
    }

    /// List subscribers newest first, optionally only active ones.
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsletterSubscriber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM newsletter_subscribers \
             WHERE (NOT $1 OR is_active) \
             ORDER BY subscribed_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .bind(active_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, active_only: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM newsletter_subscribers WHERE (NOT $1 OR is_active)",
        )
        .bind(active_only)
        .fetch_one(pool)
        .await
    }

    /// Addresses that should receive broadcasts: active and verified.
    pub async fn broadcast_recipients(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT email FROM newsletter_subscribers \
             WHERE is_active AND is_verified \
             ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM newsletter_subscribers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
