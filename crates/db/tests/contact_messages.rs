//! Integration tests for the contact inbox.

use folio_core::validation::{ContactSubmission, CONTACT_RATE_LIMIT, CONTACT_RATE_WINDOW_MINS};
use folio_db::models::contact_message::SubmissionMeta;
use folio_db::repositories::ContactMessageRepo;
use sqlx::PgPool;

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Jane".into(),
        email: "jane@x.com".into(),
        subject: "Hi".into(),
        message: "Hello".into(),
        ..Default::default()
    }
}

fn from_ip(ip: &str) -> SubmissionMeta {
    SubmissionMeta {
        ip_address: Some(ip.to_string()),
        user_agent: Some("test-agent".into()),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_new_message_is_unread(pool: PgPool) {
    let msg = ContactMessageRepo::create(&pool, &submission(), &from_ip("10.0.0.1"))
        .await
        .unwrap();
    assert!(!msg.is_read);
    assert_eq!(msg.ip_address.as_deref(), Some("10.0.0.1"));
    assert_eq!(ContactMessageRepo::count(&pool, true).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_recent_count_is_per_ip(pool: PgPool) {
    for _ in 0..2 {
        ContactMessageRepo::create(&pool, &submission(), &from_ip("10.0.0.1"))
            .await
            .unwrap();
    }
    ContactMessageRepo::create(&pool, &submission(), &from_ip("10.0.0.2"))
        .await
        .unwrap();

    let count =
        ContactMessageRepo::count_recent_from_ip(&pool, "10.0.0.1", CONTACT_RATE_WINDOW_MINS)
            .await
            .unwrap();
    assert_eq!(count, 2);

    sqlx::query("UPDATE contact_messages SET created_at = NOW() - INTERVAL '2 hours'")
        .execute(&pool)
        .await
        .unwrap();
    let count =
        ContactMessageRepo::count_recent_from_ip(&pool, "10.0.0.1", CONTACT_RATE_WINDOW_MINS)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_read_filters_inbox(pool: PgPool) {
    let a = ContactMessageRepo::create(&pool, &submission(), &from_ip("1.1.1.1"))
        .await
        .unwrap();
    ContactMessageRepo::create(&pool, &submission(), &from_ip("1.1.1.1"))
        .await
        .unwrap();

    let read = ContactMessageRepo::mark_read(&pool, a.id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(read.is_read);
    assert_eq!(read.message, a.message);

    let unread = ContactMessageRepo::list(&pool, true, 12, 0).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_ne!(unread[0].id, a.id);
    assert_eq!(ContactMessageRepo::list(&pool, false, 12, 0).await.unwrap().len(), 2);

    assert!(ContactMessageRepo::mark_read(&pool, 9999, true).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_within_limit_stops_at_limit(pool: PgPool) {
    let input = submission();
    let meta = from_ip("10.9.9.9");
    let calls = (0..6).map(|_| {
        ContactMessageRepo::create_within_limit(
            &pool,
            &input,
            &meta,
            CONTACT_RATE_LIMIT,
            CONTACT_RATE_WINDOW_MINS,
        )
    });
    let results = futures::future::join_all(calls).await;

    let stored = results.iter().filter(|r| matches!(r, Ok(Some(_)))).count();
    let refused = results.iter().filter(|r| matches!(r, Ok(None))).count();
    assert_eq!(stored, 3);
    assert_eq!(refused, 3);
    assert_eq!(ContactMessageRepo::count(&pool, false).await.unwrap(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_within_limit_without_address_always_stores(pool: PgPool) {
    let meta = SubmissionMeta {
        ip_address: None,
        user_agent: None,
    };
    for _ in 0..5 {
        let stored = ContactMessageRepo::create_within_limit(
            &pool,
            &submission(),
            &meta,
            CONTACT_RATE_LIMIT,
            CONTACT_RATE_WINDOW_MINS,
        )
        .await
        .unwrap();
        assert!(stored.is_some());
    }
}
