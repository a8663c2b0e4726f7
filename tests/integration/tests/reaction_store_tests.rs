//! Reaction store scenario tests
//!
//! Run against the in-memory backend; no external services needed.
//!
//! Run with: cargo test -p integration-tests --test reaction_store_tests

use std::sync::Arc;
use std::time::Duration;

use campaign_core::{CampaignId, ReactionKind, StoreEvent, UserId};
use campaign_service::{StoreError, StoreSettings};
use integration_tests::{build_store, fast_settings, Harness, StaticSession};

// ============================================================================
// Toggle Semantics
// ============================================================================

#[tokio::test]
async fn test_toggle_same_kind_twice_removes_reaction() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();
    assert_eq!(h.store.snapshot().aggregate.count(c, ReactionKind::Fire), 0);

    let first = h.store.toggle(c, ReactionKind::Fire).await.unwrap();
    assert_eq!(first, Some(ReactionKind::Fire));
    assert_eq!(h.store.snapshot().aggregate.count(c, ReactionKind::Fire), 1);

    let second = h.store.toggle(c, ReactionKind::Fire).await.unwrap();
    assert_eq!(second, None);

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.user_index.get(c), None);
    assert_eq!(snapshot.aggregate.count(c, ReactionKind::Fire), 0);
    assert_eq!(h.repo.row_count(c, h.user), 0);
}

#[tokio::test]
async fn test_toggle_other_kind_replaces() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.repo.seed(c, UserId::random(), ReactionKind::Like);
    h.repo.seed(c, h.user, ReactionKind::Like);
    h.store.track(c).await.unwrap();
    assert_eq!(h.store.snapshot().aggregate.count(c, ReactionKind::Like), 2);

    h.store.toggle(c, ReactionKind::Love).await.unwrap();

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.user_index.get(c), Some(ReactionKind::Love));
    assert_eq!(snapshot.aggregate.count(c, ReactionKind::Like), 1);
    assert_eq!(snapshot.aggregate.count(c, ReactionKind::Love), 1);
    assert_eq!(h.repo.stored_kind(c, h.user), Some(ReactionKind::Love));
}

#[tokio::test]
async fn test_sequential_clicks_keep_one_row_per_pair() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();

    let clicks = [
        (ReactionKind::Like, Some(ReactionKind::Like)),
        (ReactionKind::Love, Some(ReactionKind::Love)),
        (ReactionKind::Fire, Some(ReactionKind::Fire)),
        (ReactionKind::Love, Some(ReactionKind::Love)),
        (ReactionKind::Love, None),
    ];
    for (kind, expected) in clicks {
        let now = h.store.toggle(c, kind).await.unwrap();
        assert_eq!(now, expected);
        assert_eq!(h.repo.row_count(c, h.user), usize::from(expected.is_some()));
        assert_eq!(h.repo.stored_kind(c, h.user), expected);
        assert_eq!(h.store.snapshot().aggregate.total(c), u32::from(expected.is_some()));
    }
}

const RAPID_CLICKS: [(ReactionKind, Option<ReactionKind>); 5] = [
    (ReactionKind::Like, Some(ReactionKind::Like)),
    (ReactionKind::Love, Some(ReactionKind::Love)),
    (ReactionKind::Fire, Some(ReactionKind::Fire)),
    (ReactionKind::Love, Some(ReactionKind::Love)),
    (ReactionKind::Love, None),
];

#[tokio::test]
async fn test_rapid_clicks_settle_on_last_kind() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();
    // Lands in the backend while the clicks are in flight
    h.repo.seed(c, UserId::random(), ReactionKind::Wow);
    h.repo.set_latency(Some(Duration::from_millis(50)));

    let mut writes = Vec::new();
    for (kind, expected) in RAPID_CLICKS {
        writes.push(tokio::spawn(h.store.toggle(c, kind)));

        let snapshot = h.store.snapshot();
        assert_eq!(snapshot.user_index.get(c), expected);
        assert_eq!(snapshot.aggregate.total(c), u32::from(expected.is_some()));
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let results = futures::future::join_all(writes).await;
    for (result, (_, expected)) in results.into_iter().zip(RAPID_CLICKS) {
        assert_eq!(result.unwrap().unwrap(), expected);
    }
    assert_eq!(h.repo.stored_kind(c, h.user), None);
    assert_eq!(h.repo.row_count(c, h.user), 0);

    tokio::time::sleep(Duration::from_millis(150)).await;

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.user_index.get(c), None);
    assert_eq!(snapshot.aggregate.count(c, ReactionKind::Wow), 1);
    assert_eq!(snapshot.aggregate.total(c), 1);
}

#[tokio::test]
async fn test_rapid_failed_clicks_restore_original_state() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.repo.seed(c, h.user, ReactionKind::Thinking);
    h.repo.seed(c, UserId::random(), ReactionKind::Like);
    h.store.track(c).await.unwrap();
    let before = h.store.snapshot();

    // No write lands and no refresh can repair local state
    h.repo.fail_all_writes(true);
    h.repo.fail_aggregate(true);
    h.repo.fail_user_rows(true);
    h.repo.fail_scan(true);
    h.repo.set_latency(Some(Duration::from_millis(50)));

    let mut writes = Vec::new();
    for (kind, _) in RAPID_CLICKS {
        writes.push(tokio::spawn(h.store.toggle(c, kind)));
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_ne!(h.store.snapshot(), before);

    let results = futures::future::join_all(writes).await;
    assert!(results.iter().all(|r| matches!(r, Ok(Err(_)))));
    assert!(matches!(
        results.last(),
        Some(Ok(Err(StoreError::RolledBack { .. })))
    ));
    assert_eq!(h.store.snapshot(), before);
    assert_eq!(h.repo.stored_kind(c, h.user), Some(ReactionKind::Thinking));

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(h.store.snapshot(), before);
}

#[tokio::test]
async fn test_two_concurrent_failed_clicks_leave_no_trace() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();
    let before = h.store.snapshot();

    h.repo.fail_all_writes(true);
    h.repo.set_latency(Some(Duration::from_millis(30)));

    let (first, second) = tokio::join!(
        h.store.toggle(c, ReactionKind::Like),
        h.store.toggle(c, ReactionKind::Like)
    );

    assert!(first.is_err());
    assert!(second.is_err());
    assert_eq!(h.store.snapshot(), before);
    assert_eq!(h.repo.stored_kind(c, h.user), None);
}

#[tokio::test]
async fn test_optimistic_state_visible_before_write_completes() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();
    h.repo.set_latency(Some(Duration::from_millis(50)));

    let mut events = h.store.subscribe();
    let pending = h.store.toggle(c, ReactionKind::Clap);

    assert_eq!(h.store.snapshot().user_index.get(c), Some(ReactionKind::Clap));
    assert_eq!(
        events.try_recv().unwrap(),
        StoreEvent::Optimistic {
            campaign_id: c,
            kind: Some(ReactionKind::Clap)
        }
    );
    assert_eq!(h.repo.write_calls(), 0);

    pending.await.unwrap();
    assert_eq!(events.recv().await.unwrap(), StoreEvent::Confirmed { campaign_id: c });
}

// ============================================================================
// Rollback
// ============================================================================

#[tokio::test]
async fn test_failed_write_rolls_back_exactly() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.repo.seed(c, h.user, ReactionKind::Thinking);
    h.repo.seed(c, UserId::random(), ReactionKind::Thinking);
    h.repo.seed(c, UserId::random(), ReactionKind::Wow);
    h.store.track(c).await.unwrap();
    let before = h.store.snapshot();

    h.repo.fail_all_writes(true);
    let mut events = h.store.subscribe();
    let err = h.store.toggle(c, ReactionKind::Wow).await.unwrap_err();

    assert!(matches!(err, StoreError::RolledBack { campaign_id, .. } if campaign_id == c));
    assert_eq!(h.store.snapshot(), before);
    assert_eq!(h.repo.stored_kind(c, h.user), Some(ReactionKind::Thinking));

    let mut saw_rollback = false;
    while let Ok(event) = events.try_recv() {
        saw_rollback |= event == StoreEvent::RolledBack { campaign_id: c };
    }
    assert!(saw_rollback);
}

#[tokio::test]
async fn test_failure_on_one_campaign_leaves_others() {
    let h = Harness::new();
    let (a, b) = (CampaignId::random(), CampaignId::random());
    h.store.track_many([a, b]).await.unwrap();
    h.repo.fail_writes_for(a);

    let (on_a, on_b) = tokio::join!(
        h.store.toggle(a, ReactionKind::Like),
        h.store.toggle(b, ReactionKind::Like)
    );

    assert!(on_a.is_err());
    assert_eq!(on_b.unwrap(), Some(ReactionKind::Like));

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.user_index.get(a), None);
    assert_eq!(snapshot.aggregate.count(a, ReactionKind::Like), 0);
    assert_eq!(snapshot.user_index.get(b), Some(ReactionKind::Like));
    assert_eq!(snapshot.aggregate.count(b, ReactionKind::Like), 1);
}

#[tokio::test]
async fn test_timeout_rolls_back() {
    let h = Harness::with_settings(StoreSettings {
        request_timeout: Duration::from_millis(30),
        ..fast_settings()
    });
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();
    let before = h.store.snapshot();

    h.repo.set_latency(Some(Duration::from_millis(200)));
    let err = h.store.toggle(c, ReactionKind::Fire).await.unwrap_err();

    assert_eq!(err.error_code(), "REACTION_ROLLED_BACK");
    assert!(err.to_string().contains("timed out"));
    assert_eq!(h.store.snapshot(), before);
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_toggle_without_session_changes_nothing() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();
    let before = h.store.snapshot();

    h.session.sign_out();
    let err = h.store.toggle(c, ReactionKind::Like).await.unwrap_err();

    assert!(err.is_unauthenticated());
    assert_eq!(h.store.snapshot(), before);
    assert_eq!(h.repo.write_calls(), 0);
}

#[tokio::test]
async fn test_fetch_without_session_is_rejected() {
    let repo = Arc::new(integration_tests::InMemoryReactionRepository::new());
    let store = build_store(repo.clone(), Arc::new(StaticSession::anonymous()), fast_settings());

    let err = store.track(CampaignId::random()).await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert_eq!(repo.aggregate_calls(), 0);
}

// ============================================================================
// Fetching
// ============================================================================

#[tokio::test]
async fn test_tracking_zero_fills_every_campaign() {
    let h = Harness::new();
    let (a, b) = (CampaignId::random(), CampaignId::random());
    h.repo.seed(a, UserId::random(), ReactionKind::Like);
    h.repo.seed(a, h.user, ReactionKind::Fire);

    h.store.track_many([a, b]).await.unwrap();

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.aggregate.len(), 2);
    assert_eq!(snapshot.aggregate.count(a, ReactionKind::Like), 1);
    assert_eq!(snapshot.aggregate.count(a, ReactionKind::Fire), 1);
    assert!(snapshot.aggregate.get(b).is_some_and(|counts| counts.is_empty()));
    assert_eq!(snapshot.user_index.get(a), Some(ReactionKind::Fire));
    assert_eq!(snapshot.user_index.get(b), None);
}

#[tokio::test]
async fn test_tracking_known_campaign_does_not_refetch() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();
    h.store.track(c).await.unwrap();
    assert_eq!(h.repo.aggregate_calls(), 1);
}

#[tokio::test]
async fn test_fallback_scan_when_grouped_query_fails() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.repo.seed(c, h.user, ReactionKind::Wow);
    h.repo.seed(c, UserId::random(), ReactionKind::Wow);
    h.repo.seed(c, UserId::random(), ReactionKind::Clap);
    h.repo.fail_aggregate(true);

    h.store.track(c).await.unwrap();

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.aggregate.count(c, ReactionKind::Wow), 2);
    assert_eq!(snapshot.aggregate.count(c, ReactionKind::Clap), 1);
    assert_eq!(snapshot.user_index.get(c), Some(ReactionKind::Wow));
}

#[tokio::test]
async fn test_prior_state_survives_when_all_reads_fail() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.repo.seed(c, UserId::random(), ReactionKind::Love);
    h.store.track(c).await.unwrap();
    let before = h.store.snapshot();

    h.repo.seed(c, UserId::random(), ReactionKind::Love);
    h.repo.fail_user_rows(true);
    h.repo.fail_scan(true);

    let err = h.store.refresh().await.unwrap_err();
    assert!(matches!(err, StoreError::Fetch(_)));
    assert_eq!(h.store.snapshot(), before);
}

#[tokio::test]
async fn test_no_fallback_when_disabled() {
    let h = Harness::with_settings(StoreSettings {
        fallback_scan: false,
        ..fast_settings()
    });
    h.repo.fail_aggregate(true);

    let err = h.store.track(CampaignId::random()).await.unwrap_err();
    assert_eq!(err.error_code(), "REACTIONS_FETCH_FAILED");
}

#[tokio::test]
async fn test_loading_flag_while_fetch_in_flight() {
    let h = Harness::new();
    h.repo.set_latency(Some(Duration::from_millis(80)));

    let store = h.store.clone();
    let fetch = tokio::spawn(async move { store.track(CampaignId::random()).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(h.store.snapshot().is_loading);

    fetch.await.unwrap().unwrap();
    assert!(!h.store.snapshot().is_loading);
}

#[tokio::test]
async fn test_empty_working_set_resets_without_backend() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();
    h.store.untrack(c);

    h.repo.fail_aggregate(true);
    h.repo.fail_scan(true);
    h.store.refresh().await.unwrap();

    assert!(h.store.snapshot().aggregate.is_empty());
    assert_eq!(h.repo.aggregate_calls(), 1);
}

// ============================================================================
// Working Set & Reconciliation
// ============================================================================

#[tokio::test]
async fn test_untracked_toggle_keeps_working_set() {
    let h = Harness::new();
    let tracked = CampaignId::random();
    let other = CampaignId::random();
    h.store.track(tracked).await.unwrap();

    h.store.toggle(other, ReactionKind::Like).await.unwrap();

    assert_eq!(h.store.working_set(), vec![tracked]);
    assert_eq!(h.repo.stored_kind(other, h.user), Some(ReactionKind::Like));
}

#[tokio::test]
async fn test_scheduled_refresh_picks_up_other_writers() {
    let h = Harness::new();
    let c = CampaignId::random();
    h.store.track(c).await.unwrap();

    // Another user reacts after our fetch
    h.repo.seed(c, UserId::random(), ReactionKind::Like);
    h.store.toggle(c, ReactionKind::Fire).await.unwrap();
    assert_eq!(h.store.snapshot().aggregate.count(c, ReactionKind::Like), 0);

    tokio::time::sleep(Duration::from_millis(150)).await;

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.aggregate.count(c, ReactionKind::Like), 1);
    assert_eq!(snapshot.aggregate.count(c, ReactionKind::Fire), 1);
    assert_eq!(snapshot.user_index.get(c), Some(ReactionKind::Fire));
}

#[tokio::test]
async fn test_burst_of_toggles_triggers_one_refresh() {
    let h = Harness::new();
    let (a, b, c) = (CampaignId::random(), CampaignId::random(), CampaignId::random());
    h.store.track_many([a, b, c]).await.unwrap();

    h.store.toggle(a, ReactionKind::Like).await.unwrap();
    h.store.toggle(b, ReactionKind::Love).await.unwrap();
    h.store.toggle(c, ReactionKind::Wow).await.unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(h.repo.aggregate_calls(), 2);
}
