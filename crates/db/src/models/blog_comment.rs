//! Blog comment model, moderation DTOs, and the public threaded view.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blog_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogComment {
    pub id: DbId,
    pub post_id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    pub email: String,
    pub website: Option<String>,
    pub body: String,
    pub is_approved: bool,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment as shown to visitors: no email or address, replies nested.
#[derive(Debug, Clone, Serialize)]
pub struct PublicComment {
    pub id: DbId,
    pub name: String,
    pub website: Option<String>,
    pub body: String,
    pub created_at: Timestamp,
    pub replies: Vec<PublicComment>,
}

impl From<&BlogComment> for PublicComment {
    fn from(c: &BlogComment) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            website: c.website.clone(),
            body: c.body.clone(),
            created_at: c.created_at,
            replies: Vec::new(),
        }
    }
}

/// Group approved comments into top-level threads with their replies.
///
/// Input order is kept, so callers pass comments oldest first. Replies whose
/// parent is missing from `comments` are dropped.
pub fn thread_comments(comments: &[BlogComment]) -> Vec<PublicComment> {
    let mut threads: Vec<PublicComment> = comments
        .iter()
        .filter(|c| c.parent_id.is_none())
        .map(PublicComment::from)
        .collect();
    for reply in comments.iter().filter(|c| c.parent_id.is_some()) {
        if let Some(thread) = threads.iter_mut().find(|t| Some(t.id) == reply.parent_id) {
            thread.replies.push(PublicComment::from(reply));
        }
    }
    threads
}

/// Result of a moderation change: the new row and its previous approval.
#[derive(Debug, Clone, FromRow)]
pub struct ApprovalChange {
    #[sqlx(flatten)]
    pub comment: BlogComment,
    pub was_approved: bool,
}

impl ApprovalChange {
    pub fn newly_approved(&self) -> bool {
        !self.was_approved && self.comment.is_approved
    }
}

/// DTO for approving or hiding a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct SetApproval {
    pub is_approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn comment(id: DbId, parent_id: Option<DbId>, minutes: i64) -> BlogComment {
        let at = Utc::now() - Duration::minutes(100 - minutes);
        BlogComment {
            id,
            post_id: 1,
            parent_id,
            name: format!("c{id}"),
            email: format!("c{id}@x.com"),
            website: None,
            body: "text".into(),
            is_approved: true,
            ip_address: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn replies_nest_under_their_parent_in_order() {
        let comments = vec![
            comment(1, None, 0),
            comment(2, None, 1),
            comment(3, Some(1), 2),
            comment(4, Some(1), 3),
            comment(5, Some(2), 4),
        ];
        let threads = thread_comments(&comments);
        assert_eq!(threads.len(), 2);
        let first: Vec<DbId> = threads[0].replies.iter().map(|r| r.id).collect();
        assert_eq!(first, vec![3, 4]);
        assert_eq!(threads[1].replies[0].id, 5);
    }

    #[test]
    fn orphan_replies_are_dropped() {
        let threads = thread_comments(&[comment(1, None, 0), comment(2, Some(99), 1)]);
        assert_eq!(threads.len(), 1);
        assert!(threads[0].replies.is_empty());
    }
}
