//! Integration tests for the notification dispatch table.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use folio_core::validation::ContactSubmission;
use folio_db::models::blog_comment::BlogComment;
use folio_db::models::contact_message::SubmissionMeta;
use folio_db::models::newsletter::SubscribeOutcome;
use folio_db::models::site_settings::UpdateSiteSettings;
use folio_db::repositories::newsletter_repo::SubscribeParams;
use folio_db::repositories::{ContactMessageRepo, NewsletterRepo, SiteSettingsRepo};
use folio_events::{
    DeliveryReport, DispatchConfig, DomainEvent, EmailError, EventBus, Mailer,
    NotificationDispatcher, OutgoingEmail,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test mailers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), EmailError> {
        Err(EmailError::Build("provider unavailable".into()))
    }
}

fn config(owner: Option<&str>) -> DispatchConfig {
    DispatchConfig {
        owner_email: owner.map(str::to_string),
        site_name: Some("Folio".into()),
        site_url: "https://folio.test".into(),
    }
}

async fn contact_event(pool: &PgPool) -> DomainEvent {
    let submission = ContactSubmission {
        name: "Jane".into(),
        email: "jane@x.com".into(),
        subject: "Hi".into(),
        message: "Hello".into(),
        ..Default::default()
    };
    let message = ContactMessageRepo::create(pool, &submission, &SubmissionMeta::default())
        .await
        .unwrap();
    DomainEvent::ContactReceived { message }
}

fn comment(email: &str, is_approved: bool) -> BlogComment {
    BlogComment {
        id: 10,
        post_id: 1,
        parent_id: Some(9),
        name: "Ann".into(),
        email: email.into(),
        website: None,
        body: "Great read".into(),
        is_approved,
        ip_address: None,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_contact_sends_owner_and_acknowledgment(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let dispatcher =
        NotificationDispatcher::new(pool.clone(), mailer.clone(), config(Some("owner@x.com")));

    let report = dispatcher.handle(&contact_event(&pool).await).await;

    assert_eq!(report, DeliveryReport { attempted: 2, failed: 0 });
    let recipients: Vec<Vec<String>> = mailer.sent().into_iter().map(|e| e.to).collect();
    assert_eq!(
        recipients,
        vec![vec!["owner@x.com".to_string()], vec!["jane@x.com".to_string()]]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_failing_provider_is_counted_not_propagated(pool: PgPool) {
    let dispatcher =
        NotificationDispatcher::new(pool.clone(), Arc::new(FailingMailer), config(Some("o@x.com")));

    let report = dispatcher.handle(&contact_event(&pool).await).await;

    assert_eq!(report, DeliveryReport { attempted: 2, failed: 2 });
    assert_eq!(ContactMessageRepo::count(&pool, false).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_owner_falls_back_to_settings_email(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let dispatcher = NotificationDispatcher::new(pool.clone(), mailer.clone(), config(None));
    let milestone = DomainEvent::ProjectViewMilestone {
        project_id: 1,
        title: "Site".into(),
        slug: "site".into(),
        view_count: 100,
    };

    // Default settings have an empty email: nothing to send.
    assert_eq!(dispatcher.handle(&milestone).await.attempted, 0);

    SiteSettingsRepo::update(
        &pool,
        &UpdateSiteSettings {
            email: Some("me@folio.test".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(dispatcher.handle(&milestone).await.attempted, 1);
    assert_eq!(mailer.sent()[0].to, vec!["me@folio.test".to_string()]);
    assert!(mailer.sent()[0].subject.contains("100 views"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_welcome_only_for_created_or_reactivated(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let dispatcher = NotificationDispatcher::new(pool, mailer.clone(), config(None));

    let joined = |outcome| DomainEvent::SubscriberJoined {
        email: "bob@x.com".into(),
        name: None,
        verification_token: Some("tok".into()),
        outcome,
    };

    assert_eq!(dispatcher.handle(&joined(SubscribeOutcome::AlreadySubscribed)).await.attempted, 0);
    assert_eq!(dispatcher.handle(&joined(SubscribeOutcome::Created)).await.attempted, 1);
    assert_eq!(dispatcher.handle(&joined(SubscribeOutcome::Reactivated)).await.attempted, 1);

    let sent = mailer.sent();
    assert!(sent[0].body.contains("https://folio.test/api/v1/newsletter/verify/tok"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_post_broadcast_reaches_verified_subscribers_only(pool: PgPool) {
    for (email, token) in [("a@x.com", "ta"), ("b@x.com", "tb"), ("c@x.com", "tc")] {
        NewsletterRepo::subscribe(
            &pool,
            &SubscribeParams {
                email,
                verification_token: token,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }
    NewsletterRepo::verify(&pool, "ta").await.unwrap();
    NewsletterRepo::verify(&pool, "tb").await.unwrap();
    NewsletterRepo::unsubscribe(&pool, "b@x.com").await.unwrap();

    let mailer = Arc::new(RecordingMailer::default());
    let dispatcher = NotificationDispatcher::new(pool, mailer.clone(), config(None));
    let report = dispatcher
        .handle(&DomainEvent::PostPublished {
            post_id: 1,
            title: "Hello".into(),
            slug: "hello".into(),
            excerpt: "First post".into(),
        })
        .await;

    assert_eq!(report.attempted, 1);
    let sent = mailer.sent();
    assert!(sent[0].to.is_empty());
    assert_eq!(sent[0].bcc, vec!["a@x.com".to_string()]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_run_drains_and_exits_when_bus_dropped(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let dispatcher =
        NotificationDispatcher::new(pool.clone(), mailer.clone(), config(Some("o@x.com")));

    let bus = EventBus::default();
    let handle = tokio::spawn(dispatcher.run(bus.subscribe()));

    bus.publish(contact_event(&pool).await);
    drop(bus);

    handle.await.unwrap();
    assert_eq!(mailer.sent().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_only_pending_comments_page_the_owner(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let dispatcher = NotificationDispatcher::new(pool, mailer.clone(), config(Some("o@x.com")));
    let submitted = |is_approved| DomainEvent::CommentSubmitted {
        comment: comment("ann@x.com", is_approved),
        post_title: "Hello".into(),
        post_slug: "hello".into(),
    };

    assert_eq!(dispatcher.handle(&submitted(true)).await.attempted, 0);
    assert_eq!(dispatcher.handle(&submitted(false)).await.attempted, 1);

    let sent = mailer.sent();
    assert_eq!(sent[0].to, vec!["o@x.com".to_string()]);
    assert!(sent[0].subject.contains("Hello"));
    assert!(sent[0].body.contains("Pending approval"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reply_notifies_parent_unless_self_reply(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let dispatcher = NotificationDispatcher::new(pool, mailer.clone(), config(None));
    let reply_to = |parent_email: &str| DomainEvent::CommentReplyApproved {
        reply: comment("ann@x.com", true),
        parent_name: "Bob".into(),
        parent_email: parent_email.into(),
        post_title: "Hello".into(),
        post_slug: "hello".into(),
    };

    assert_eq!(dispatcher.handle(&reply_to("ann@x.com")).await.attempted, 0);
    assert_eq!(dispatcher.handle(&reply_to("bob@x.com")).await.attempted, 1);
    assert_eq!(mailer.sent()[0].to, vec!["bob@x.com".to_string()]);
}
