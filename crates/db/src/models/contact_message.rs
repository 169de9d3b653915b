//! Contact message entity model.
//!
//! Rows are created from a validated
//! [`ContactSubmission`](folio_core::validation::ContactSubmission) and never
//! edited afterwards except for the `is_read` flag.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub is_read: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// Request-derived metadata captured alongside a submission.
#[derive(Debug, Clone, Default)]
pub struct SubmissionMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// DTO for toggling the read flag.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkRead {
    pub is_read: bool,
}
