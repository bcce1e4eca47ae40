mod test_helpers;

use std::sync::Arc;

use chrono::Duration;
use guess_core::SessionError;
use guess_types::DateKey;
use test_helpers::*;

#[tokio::test]
async fn test_submit_returns_record_and_snapshot() {
    let scorer = Arc::new(TableScorer::new(&[("apple", 0.3), ("bread", 1.0)]));
    let setup = TestSetup::new(scorer.clone()).await;

    setup.session_manager.submit_guess("apple").await.unwrap();
    let accepted = setup.session_manager.submit_guess("bread").await.unwrap();

    assert_eq!(accepted.record.word, "bread");
    assert!(accepted.snapshot.solved);
    assert_eq!(accepted.snapshot.attempt_count, 2);
    assert_eq!(accepted.snapshot.records[0].word, "bread");
    assert!(accepted.snapshot.is_today);
    assert_eq!(scorer.call_count(), 2);
}

#[tokio::test]
async fn test_same_word_blocked_while_scoring() {
    let scorer = GatedScorer::default();
    let setup = TestSetup::new(Arc::new(scorer.clone())).await;

    let manager = setup.session_manager.clone();
    let first = tokio::spawn(async move { manager.submit_guess("apple").await });
    scorer.started.notified().await;

    let second = setup.session_manager.submit_guess("apple").await;
    assert!(matches!(second, Err(SessionError::GuessPending { .. })));

    // The store is not locked while the first call is parked
    assert_eq!(setup.session_manager.snapshot().await.attempt_count, 0);

    scorer.release.notify_one();
    let accepted = first.await.unwrap().unwrap();
    assert_eq!(accepted.snapshot.attempt_count, 1);

    let third = setup.session_manager.submit_guess("apple").await;
    assert!(matches!(third, Err(SessionError::DuplicateGuess { .. })));
}

#[tokio::test]
async fn test_aborted_request_releases_word() {
    let scorer = GatedScorer::default();
    let setup = TestSetup::new(Arc::new(scorer.clone())).await;

    let manager = setup.session_manager.clone();
    let first = tokio::spawn(async move { manager.submit_guess("apple").await });
    scorer.started.notified().await;

    first.abort();
    assert!(first.await.unwrap_err().is_cancelled());

    scorer.release.notify_one();
    let accepted = setup.session_manager.submit_guess("apple").await.unwrap();
    assert_eq!(accepted.record.word, "apple");
    assert_eq!(accepted.snapshot.attempt_count, 1);
}

#[tokio::test]
async fn test_future_date_clamped_to_today() {
    let setup = TestSetup::new(Arc::new(TableScorer::new(&[]))).await;
    let today = DateKey::today();
    let future = DateKey::from_date(today.date() + Duration::days(3));

    let snapshot = setup.session_manager.select_date(future).await;
    assert_eq!(snapshot.date_key, today);
}

#[tokio::test]
async fn test_past_date_has_own_history() {
    let scorer = Arc::new(TableScorer::new(&[("apple", 0.3)]));
    let setup = TestSetup::new(scorer).await;
    let yesterday = DateKey::from_date(DateKey::today().date() - Duration::days(1));

    setup.session_manager.submit_guess("apple").await.unwrap();
    let snapshot = setup.session_manager.select_date(yesterday).await;
    assert_eq!(snapshot.attempt_count, 0);
    assert!(!snapshot.is_today);

    let accepted = setup.session_manager.submit_guess("apple").await.unwrap();
    assert_eq!(accepted.snapshot.date_key, yesterday);

    let today = setup.session_manager.summary(DateKey::today()).await.unwrap();
    assert_eq!(today.attempt_count, 1);
}

#[tokio::test]
async fn test_unavailable_scorer_records_nothing() {
    let setup = TestSetup::new(Arc::new(TableScorer::unavailable())).await;

    let result = setup.session_manager.submit_guess("apple").await;
    assert!(matches!(result, Err(SessionError::ScoringUnavailable(_))));
    assert_eq!(setup.session_manager.snapshot().await.attempt_count, 0);
    assert!(setup.store.is_empty());
}
