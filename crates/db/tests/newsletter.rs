//! Integration tests for idempotent newsletter subscription.

use folio_db::models::newsletter::SubscribeOutcome;
use folio_db::repositories::newsletter_repo::SubscribeParams;
use folio_db::repositories::NewsletterRepo;
use sqlx::PgPool;

fn params<'a>(email: &'a str, token: &'a str) -> SubscribeParams<'a> {
    SubscribeParams {
        email,
        verification_token: token,
        ..Default::default()
    }
}

async fn row_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_same_email_twice_keeps_one_active_row(pool: PgPool) {
    let (first, outcome) = NewsletterRepo::subscribe(&pool, &params("bob@x.com", "t1"))
        .await
        .unwrap();
    assert_eq!(outcome, SubscribeOutcome::Created);
    assert!(first.is_active);

    let (second, outcome) = NewsletterRepo::subscribe(&pool, &params("bob@x.com", "t2"))
        .await
        .unwrap();
    assert_eq!(outcome, SubscribeOutcome::AlreadySubscribed);
    assert_eq!(second.id, first.id);
    assert_eq!(second.verification_token.as_deref(), Some("t1"));
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_case_variants_collapse(pool: PgPool) {
    NewsletterRepo::subscribe(&pool, &params("A@x.com", "t1"))
        .await
        .unwrap();
    let (row, outcome) = NewsletterRepo::subscribe(&pool, &params("a@x.com", "t2"))
        .await
        .unwrap();

    assert_eq!(outcome, SubscribeOutcome::AlreadySubscribed);
    assert_eq!(row.email, "a@x.com");
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mixed_case_cannot_be_stored_directly(pool: PgPool) {
    let err = sqlx::query("INSERT INTO newsletter_subscribers (email) VALUES ('Mixed@X.com')")
        .execute(&pool)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23514"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unsubscribe_then_resubscribe_reactivates(pool: PgPool) {
    NewsletterRepo::subscribe(&pool, &params("carol@x.com", "t1"))
        .await
        .unwrap();

    let gone = NewsletterRepo::unsubscribe(&pool, "Carol@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!gone.is_active);
    assert!(gone.unsubscribed_at.is_some());

    let (back, outcome) = NewsletterRepo::subscribe(&pool, &params("carol@x.com", "t2"))
        .await
        .unwrap();
    assert_eq!(outcome, SubscribeOutcome::Reactivated);
    assert!(back.is_active);
    assert!(back.unsubscribed_at.is_none());
    assert_eq!(back.verification_token.as_deref(), Some("t2"));
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_subscribes_create_once(pool: PgPool) {
    let tokens: Vec<String> = (0..8).map(|i| format!("tok-{i}")).collect();
    let attempts: Vec<SubscribeParams<'_>> =
        tokens.iter().map(|t| params("race@x.com", t)).collect();
    let calls = attempts.iter().map(|p| NewsletterRepo::subscribe(&pool, p));
    let results = futures::future::join_all(calls).await;

    let created = results
        .iter()
        .filter(|r| matches!(r, Ok((_, SubscribeOutcome::Created))))
        .count();
    assert_eq!(created, 1);
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_resubscribes_reactivate_once(pool: PgPool) {
    NewsletterRepo::subscribe(&pool, &params("again@x.com", "first"))
        .await
        .unwrap();

    for round in 0..10 {
        NewsletterRepo::unsubscribe(&pool, "again@x.com").await.unwrap();

        let tokens: Vec<String> = (0..8).map(|i| format!("r{round}-{i}")).collect();
        let attempts: Vec<SubscribeParams<'_>> =
            tokens.iter().map(|t| params("again@x.com", t)).collect();
        let calls = attempts.iter().map(|p| NewsletterRepo::subscribe(&pool, p));
        let results = futures::future::join_all(calls).await;

        let reactivated = results
            .iter()
            .filter(|r| matches!(r, Ok((_, SubscribeOutcome::Reactivated))))
            .count();
        let already = results
            .iter()
            .filter(|r| matches!(r, Ok((_, SubscribeOutcome::AlreadySubscribed))))
            .count();
        assert_eq!(reactivated, 1, "round {round}");
        assert_eq!(already, 7, "round {round}");
    }
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verify_consumes_token(pool: PgPool) {
    NewsletterRepo::subscribe(&pool, &params("dan@x.com", "verify-me"))
        .await
        .unwrap();

    let verified = NewsletterRepo::verify(&pool, "verify-me").await.unwrap().unwrap();
    assert!(verified.is_verified);
    assert!(verified.verification_token.is_none());

    assert!(NewsletterRepo::verify(&pool, "verify-me").await.unwrap().is_none());
    assert_eq!(
        NewsletterRepo::broadcast_recipients(&pool).await.unwrap(),
        vec!["dan@x.com".to_string()]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_address_unsubscribe_is_none(pool: PgPool) {
    assert!(NewsletterRepo::unsubscribe(&pool, "nobody@x.com")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_active_only(pool: PgPool) {
    NewsletterRepo::subscribe(&pool, &params("one@x.com", "a")).await.unwrap();
    NewsletterRepo::subscribe(&pool, &params("two@x.com", "b")).await.unwrap();
    NewsletterRepo::unsubscribe(&pool, "two@x.com").await.unwrap();

    assert_eq!(NewsletterRepo::count(&pool, false).await.unwrap(), 2);
    assert_eq!(NewsletterRepo::count(&pool, true).await.unwrap(), 1);
    let active = NewsletterRepo::list(&pool, true, 12, 0).await.unwrap();
    assert_eq!(active[0].email, "one@x.com");
}
