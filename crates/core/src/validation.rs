//! Public form intake validation (contact messages, newsletter signups,
//! blog comments).
//!
//! Inputs are trimmed with `normalized()` before `validate()` so that
//! whitespace-only values count as empty. Every `String` field defaults to
//! empty when absent from the request body, so a missing field surfaces as a
//! field-level error rather than a body-parse rejection.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::types::DbId;

/// Maximum contact messages accepted from one address per rolling window.
pub const CONTACT_RATE_LIMIT: i64 = 3;

/// Rolling window for [`CONTACT_RATE_LIMIT`], in minutes.
pub const CONTACT_RATE_WINDOW_MINS: i64 = 60;

/// A contact form submission as received from a visitor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactSubmission {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required (max 100 characters)"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Subject is required (max 200 characters)"))]
    pub subject: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Message is required (max 5000 characters)"))]
    pub message: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub budget: Option<String>,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub timeline: Option<String>,

    /// Honeypot: hidden from humans, filled in by bots.
    #[serde(default)]
    pub website: Option<String>,
}

impl ContactSubmission {
    /// Trim every field, lowercase the email, and turn blank optionals into `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            phone: blank_to_none(self.phone),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            budget: blank_to_none(self.budget),
            timeline: blank_to_none(self.timeline),
            website: blank_to_none(self.website),
        }
    }

    /// Whether the honeypot field was filled in.
    pub fn is_spam(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.trim().is_empty())
    }
}

/// A newsletter signup request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewsletterSignup {
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: Option<String>,

    /// Where the visitor subscribed from (e.g. `"footer"`, `"blog"`).
    #[serde(default)]
    #[validate(length(max = 50))]
    pub source: Option<String>,
}

impl NewsletterSignup {
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            name: blank_to_none(self.name),
            source: blank_to_none(self.source),
        }
    }
}

/// A comment on a blog post, optionally replying to another comment.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentSubmission {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required (max 100 characters)"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(url(message = "Enter a valid URL"))]
    pub website: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Comment is required (max 5000 characters)"))]
    pub body: String,

    /// The comment this one replies to. Must belong to the same post.
    #[serde(default)]
    pub parent_id: Option<DbId>,
}

impl CommentSubmission {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            website: blank_to_none(self.website),
            body: self.body.trim().to_string(),
            parent_id: self.parent_id,
        }
    }
}

/// Canonical form of an email address for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Flatten `validator` errors into `{ field: [messages] }` for API responses.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
