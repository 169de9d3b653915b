//! Background task that turns [`DomainEvent`]s into emails.
//!
//! [`NotificationDispatcher::handle`] is the dispatch table: one match arm
//! per event kind, each producing zero or more [`OutgoingEmail`]s. A failed
//! send is logged and counted; it never propagates back to the write that
//! published the event.

use std::sync::Arc;

use folio_db::repositories::{NewsletterRepo, SiteSettingsRepo};
use folio_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::DomainEvent;
use crate::delivery::email::{Mailer, OutgoingEmail};
use crate::templates;

/// Site name used when settings cannot be read.
const FALLBACK_SITE_NAME: &str = "Portfolio";

/// Static inputs for notification content.
#[derive(Debug, Clone, Default)]
pub struct DispatchConfig {
    /// Owner address for notifications. When `None`, the settings email is used.
    pub owner_email: Option<String>,
    /// Site name for email copy. When `None`, read from settings per event.
    pub site_name: Option<String>,
    /// Public base URL for links in emails.
    pub site_url: String,
}

/// Outcome of handling one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub failed: usize,
}

/// Sends notification emails for events received from the bus.
pub struct NotificationDispatcher {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
    config: DispatchConfig,
}

impl NotificationDispatcher {
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>, config: DispatchConfig) -> Self {
        Self {
            pool,
            mailer,
            config,
        }
    }

    /// Run the dispatch loop until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let report = self.handle(&event).await;
                    tracing::debug!(
                        event_type = event.event_type(),
                        attempted = report.attempted,
                        failed = report.failed,
                        "Event dispatched"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Build and send every email an event calls for.
    pub async fn handle(&self, event: &DomainEvent) -> DeliveryReport {
        let emails = match event {
            DomainEvent::ContactReceived { message } => {
                let mut out = Vec::with_capacity(2);
                if let Some(owner) = self.owner_email().await {
                    out.push(templates::contact_owner_notification(&owner, message));
                }
                let site_name = self.site_name().await;
                out.push(templates::contact_acknowledgment(&site_name, message));
                out
            }
            DomainEvent::SubscriberJoined {
                email,
                name,
                verification_token,
                outcome,
            } => {
                if !outcome.sends_welcome() {
                    Vec::new()
                } else {
                    let site_name = self.site_name().await;
                    vec![templates::newsletter_welcome(
                        &site_name,
                        &self.config.site_url,
                        email,
                        name.as_deref(),
                        verification_token.as_deref(),
                    )]
                }
            }
            DomainEvent::PostPublished {
                title,
                slug,
                excerpt,
                ..
            } => match NewsletterRepo::broadcast_recipients(&self.pool).await {
                Ok(recipients) => {
                    let site_name = self.site_name().await;
                    templates::new_post_broadcast(
                        &site_name,
                        &self.config.site_url,
                        &recipients,
                        title,
                        slug,
                        excerpt,
                    )
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load newsletter recipients");
                    Vec::new()
                }
            },
            DomainEvent::CommentSubmitted {
                comment,
                post_title,
                post_slug,
            } => {
                // Approved comments need no moderation, so the owner is not paged.
                if comment.is_approved {
                    Vec::new()
                } else {
                    match self.owner_email().await {
                        Some(owner) => vec![templates::comment_owner_notification(
                            &owner,
                            &self.config.site_url,
                            comment,
                            post_title,
                            post_slug,
                        )],
                        None => Vec::new(),
                    }
                }
            }
            DomainEvent::CommentReplyApproved {
                reply,
                parent_name,
                parent_email,
                post_title,
                post_slug,
            } => {
                if parent_email.eq_ignore_ascii_case(&reply.email) {
                    Vec::new()
                } else {
                    vec![templates::comment_reply_notification(
                        &self.config.site_url,
                        parent_name,
                        parent_email,
                        reply,
                        post_title,
                        post_slug,
                    )]
                }
            }
            DomainEvent::ProjectViewMilestone {
                title,
                slug,
                view_count,
                ..
            } => match self.owner_email().await {
                Some(owner) => vec![templates::view_milestone(&owner, title, slug, *view_count)],
                None => Vec::new(),
            },
        };

        self.send_all(event.event_type(), &emails).await
    }

    async fn send_all(&self, event_type: &str, emails: &[OutgoingEmail]) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for email in emails {
            report.attempted += 1;
            if let Err(e) = self.mailer.send(email).await {
                report.failed += 1;
                tracing::error!(
                    error = %e,
                    event_type,
                    subject = %email.subject,
                    "Failed to send notification email"
                );
            }
        }
        report
    }

    /// Configured owner address, else the non-empty settings email.
    async fn owner_email(&self) -> Option<String> {
        if let Some(owner) = &self.config.owner_email {
            return Some(owner.clone());
        }
        match SiteSettingsRepo::get_or_create(&self.pool).await {
            Ok(settings) if !settings.email.trim().is_empty() => Some(settings.email),
            Ok(_) => {
                tracing::warn!("No owner email configured, skipping owner notification");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load site settings for owner email");
                None
            }
        }
    }

    async fn site_name(&self) -> String {
        if let Some(name) = &self.config.site_name {
            return name.clone();
        }
        match SiteSettingsRepo::get_or_create(&self.pool).await {
            Ok(settings) => settings.site_name,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load site settings for site name");
                FALLBACK_SITE_NAME.to_string()
            }
        }
    }
}
