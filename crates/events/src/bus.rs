//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` in the API state. Handlers
//! publish after their write has committed, so a subscriber never sees an
//! event for a row that does not exist.

use folio_core::types::DbId;
use folio_db::models::blog_comment::BlogComment;
use folio_db::models::contact_message::ContactMessage;
use folio_db::models::newsletter::SubscribeOutcome;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// Something that happened which may warrant a notification.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A visitor's contact message was stored.
    ContactReceived { message: ContactMessage },

    /// A newsletter subscription was created or reactivated.
    SubscriberJoined {
        email: String,
        name: Option<String>,
        verification_token: Option<String>,
        outcome: SubscribeOutcome,
    },

    /// A blog post moved into `published` for the first time in this edit.
    PostPublished {
        post_id: DbId,
        title: String,
        slug: String,
        excerpt: String,
    },

    /// A visitor commented on a post.
    CommentSubmitted {
        comment: BlogComment,
        post_title: String,
        post_slug: String,
    },

    /// A reply became visible, either on submission or through moderation.
    CommentReplyApproved {
        reply: BlogComment,
        parent_name: String,
        parent_email: String,
        post_title: String,
        post_slug: String,
    },

    /// A project's view counter reached a milestone value.
    ProjectViewMilestone {
        project_id: DbId,
        title: String,
        slug: String,
        view_count: i64,
    },
}

impl DomainEvent {
    /// Dot-separated name used in logs, e.g. `"contact.received"`.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ContactReceived { .. } => "contact.received",
            Self::SubscriberJoined { .. } => "newsletter.subscriber_joined",
            Self::PostPublished { .. } => "post.published",
            Self::CommentSubmitted { .. } => "comment.submitted",
            Self::CommentReplyApproved { .. } => "comment.reply_approved",
            Self::ProjectViewMilestone { .. } => "project.view_milestone",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use folio_events::bus::{DomainEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DomainEvent::ProjectViewMilestone {
///     project_id: 1,
///     title: "Site".into(),
///     slug: "site".into(),
///     view_count: 100,
/// });
/// ```
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unconsumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: DomainEvent) {
        tracing::debug!(event_type = event.event_type(), "Publishing event");
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
