//! Newsletter subscriber model and subscription outcome.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `newsletter_subscribers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsletterSubscriber {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    pub subscribed_at: Timestamp,
    pub unsubscribed_at: Option<Timestamp>,
    pub ip_address: Option<String>,
    pub source: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// What a subscribe call did to the subscriber table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeOutcome {
    /// No row existed; a new active subscriber was inserted.
    Created,
    /// An unsubscribed row was switched back to active.
    Reactivated,
    /// The address was already active. Nothing changed.
    AlreadySubscribed,
}

impl SubscribeOutcome {
    /// Whether this outcome warrants a welcome email.
    pub fn sends_welcome(self) -> bool {
        matches!(self, Self::Created | Self::Reactivated)
    }
}

/// Row returned when the subscribe upsert inserted or reactivated.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct SubscribeRow {
    #[sqlx(flatten)]
    pub subscriber: NewsletterSubscriber,
    pub inserted: bool,
}

impl SubscribeRow {
    pub(crate) fn outcome(&self) -> SubscribeOutcome {
        if self.inserted {
            SubscribeOutcome::Created
        } else {
            SubscribeOutcome::Reactivated
        }
    }
}
