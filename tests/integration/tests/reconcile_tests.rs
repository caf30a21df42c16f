//! End-to-end reconciliation tests over the in-memory store
//!
//! Run with: cargo test -p integration-tests --test reconcile_tests

use integration_tests::{History, TestHarness, ALICE, BOB, CAROL};
use tapback_core::{MessagePart, TapbackKind};
use tapback_service::ApplyOutcome;

// ============================================================================
// Reconcile Tests
// ============================================================================

#[tokio::test]
async fn test_reconcile_attaches_tapbacks() {
    let mut history = History::new();
    let dinner = history.sms(ALICE, "Dinner at 8?");
    let liked = history.sms(BOB, "Liked \"Dinner at 8?\"");
    history.sms(CAROL, "Laughed at “Dinner at 8?”");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!(report.added, 2);
    assert_eq!(h.emojis_on(dinner), vec!["👍", "😂"]);

    let record = &h.reactions_on(dinner)[0];
    assert_eq!(record.reaction_message_id, liked);
    assert_eq!(record.sender_address, BOB);
    assert_eq!(record.original_message_text, "Dinner at 8?");
    assert_eq!(record.thread_id, history.thread_id());
}

#[tokio::test]
async fn test_reconcile_is_idempotent() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello");
    history.sms(BOB, "Loved “Hello”");
    history.sms(CAROL, "Emphasized “Hello”");
    history.sms(CAROL, "Removed an exclamation from “Hello”");
    history.sms(BOB, "Questioned “Gone”");

    let h = TestHarness::new(history.messages()).unwrap();
    let first = h.reconcile().await.unwrap();
    let snapshot = h.reaction_snapshot();
    let carriers = h.carriers();
    let emojis = h.emojis_on(hello);

    let second = h.reconcile().await.unwrap();
    assert_eq!(second.cleared, first.records as u64);
    assert_eq!(
        (second.scanned, second.parsed, second.added, second.removed),
        (first.scanned, first.parsed, first.added, first.removed)
    );
    assert_eq!(h.reaction_snapshot(), snapshot);
    assert_eq!(h.carriers(), carriers);
    assert_eq!(h.emojis_on(hello), emojis);
}

#[tokio::test]
async fn test_add_then_remove_leaves_no_records() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello");
    let add = history.sms(BOB, "Liked “Hello”");
    let remove = history.sms(BOB, "Removed a like from “Hello”");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!((report.added, report.removed), (1, 1));
    assert!(h.reactions().is_empty());
    assert!(h.reactions_on(hello).is_empty());
    assert_eq!(h.carriers(), vec![add, remove]);
}

#[tokio::test]
async fn test_remove_before_add_keeps_the_add() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello");
    history.sms(BOB, "Removed a like from “Hello”");
    history.sms(BOB, "Liked “Hello”");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!(report.unmatched_removals, 1);
    assert_eq!(h.emojis_on(hello), vec!["👍"]);
    assert_eq!(h.observer.count("REMOVAL_UNMATCHED"), 1);
}

#[tokio::test]
async fn test_love_with_single_quotes_then_removal() {
    let mut history = History::new();
    let hi = history.sms(ALICE, "Hi");
    let add = history.sms(BOB, "Loved 'Hi'");
    let remove = history.sms(BOB, "Removed a love from 'Hi'");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!((report.added, report.removed), (1, 1));
    assert_eq!(report.records, 0);
    assert!(h.reactions().is_empty());
    assert!(h.reactions_on(hi).is_empty());
    assert_eq!(h.carriers(), vec![add, remove]);
}

#[tokio::test]
async fn test_love_removal_before_add_keeps_the_add() {
    let mut history = History::new();
    let hi = history.sms(ALICE, "Hi");
    history.sms(BOB, "Removed a love from 'Hi'");
    history.sms(BOB, "Loved 'Hi'");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!(report.unmatched_removals, 1);
    assert_eq!(report.records, 1);
    assert_eq!(h.emojis_on(hi), vec!["❤️"]);
}

#[tokio::test]
async fn test_removal_only_touches_the_senders_emoji() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello");
    history.sms(BOB, "Liked “Hello”");
    history.sms(CAROL, "Liked “Hello”");
    history.sms(BOB, "Loved “Hello”");
    history.sms(BOB, "Removed a like from “Hello”");

    let h = TestHarness::new(history.messages()).unwrap();
    h.reconcile().await.unwrap();

    let remaining: Vec<_> = h
        .reactions_on(hello)
        .into_iter()
        .map(|r| (r.sender_address, r.emoji))
        .collect();
    assert_eq!(
        remaining,
        vec![(CAROL.to_string(), "👍".to_string()), (BOB.to_string(), "❤️".to_string())]
    );
}

#[tokio::test]
async fn test_duplicate_adds_are_both_kept() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello");
    let first = history.sms(BOB, "Liked “Hello”");
    let second = history.sms(BOB, "Liked “Hello”");

    let h = TestHarness::new(history.messages()).unwrap();
    h.reconcile().await.unwrap();

    let carriers: Vec<_> = h.reactions_on(hello).iter().map(|r| r.reaction_message_id).collect();
    assert_eq!(carriers, vec![first, second]);
}

#[tokio::test]
async fn test_single_removal_cancels_one_duplicate() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello");
    history.sms(BOB, "Liked “Hello”");
    let second = history.sms(BOB, "Liked “Hello”");
    history.sms(BOB, "Removed a like from “Hello”");

    let h = TestHarness::new(history.messages()).unwrap();
    h.reconcile().await.unwrap();

    let remaining = h.reactions_on(hello);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].reaction_message_id, second);
}

// ============================================================================
// Target Resolution Tests
// ============================================================================

#[tokio::test]
async fn test_target_match_is_trimmed_and_case_sensitive() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello ");
    history.sms(BOB, "Liked “Hello”");
    history.sms(CAROL, "Liked “hello”");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!(h.reactions_on(hello).len(), 1);
    assert_eq!(h.reactions_on(hello)[0].sender_address, BOB);
    assert_eq!(report.orphaned, 1);
}

#[tokio::test]
async fn test_latest_prior_message_is_the_target() {
    let mut history = History::new();
    let older = history.sms(ALICE, "ok");
    let middle = history.sms(ALICE, "ok");
    history.sms(BOB, "Liked “ok”");
    let later = history.sms(ALICE, "ok");

    let h = TestHarness::new(history.messages()).unwrap();
    h.reconcile().await.unwrap();

    assert!(h.reactions_on(older).is_empty());
    assert_eq!(h.emojis_on(middle), vec!["👍"]);
    assert!(h.reactions_on(later).is_empty());
}

#[tokio::test]
async fn test_messages_sent_after_the_reaction_are_never_targets() {
    let mut history = History::new();
    history.sms(BOB, "Liked “ok”");
    let later = history.sms(ALICE, "ok");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert!(h.reactions_on(later).is_empty());
    assert_eq!(report.orphaned, 1);
}

#[tokio::test]
async fn test_live_arrival_matches_reconcile() {
    let mut history = History::new();
    let first = history.sms(ALICE, "ok");
    history.sms(BOB, "Liked “ok”");
    let second = history.sms(ALICE, "ok");

    let live = TestHarness::new(Vec::new()).unwrap();
    for message in history.messages() {
        live.receive(message).await.unwrap();
    }

    let bulk = TestHarness::new(history.messages()).unwrap();
    bulk.reconcile().await.unwrap();

    assert_eq!(live.emojis_on(first), vec!["👍"]);
    assert_eq!(bulk.emojis_on(first), vec!["👍"]);
    assert!(bulk.reactions_on(second).is_empty());
    assert_eq!(live.reaction_snapshot(), bulk.reaction_snapshot());
    assert_eq!(live.carriers(), bulk.carriers());
}

#[tokio::test]
async fn test_targets_are_scoped_to_the_thread() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello");
    history.switch_thread();
    history.sms(BOB, "Liked “Hello”");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert!(h.reactions_on(hello).is_empty());
    assert_eq!(report.orphaned, 1);
}

#[tokio::test]
async fn test_mms_carrier_and_target() {
    let mut history = History::new();
    let photo = history.mms(
        ALICE,
        vec![MessagePart::media("image/jpeg"), MessagePart::text("Look at this view")],
    );
    let carrier = history.mms(BOB, vec![MessagePart::text("Loved “Look at this view”")]);
    history.mms(CAROL, vec![MessagePart::media("image/png")]);

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(h.emojis_on(photo), vec![TapbackKind::Loved.emoji()]);
    assert_eq!(h.carriers(), vec![carrier]);
}

// ============================================================================
// Warning Tests
// ============================================================================

#[tokio::test]
async fn test_missing_targets_are_warnings_not_errors() {
    let mut history = History::new();
    let orphan = history.sms(BOB, "Liked “Never sent”");
    let removal = history.sms(BOB, "Removed a like from “Never sent either”");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!(report.orphaned, 1);
    assert_eq!(report.removals_without_target, 1);
    assert_eq!(h.reactions().len(), 1);
    assert_eq!(h.reactions()[0].reaction_message_id, orphan);
    assert_eq!(h.carriers(), vec![orphan, removal]);
    assert_eq!(h.observer.count("ORPHANED_REACTION"), 1);
    assert_eq!(h.observer.count("REMOVAL_WITHOUT_TARGET"), 1);
}

#[tokio::test]
async fn test_sticker_reactions_are_ordinary_messages() {
    let mut history = History::new();
    let hello = history.sms(ALICE, "Hello");
    history.sms(BOB, "Reacted with a sticker to “Hello”");

    let h = TestHarness::new(history.messages()).unwrap();
    let report = h.reconcile().await.unwrap();

    assert_eq!(report.parsed, 0);
    assert!(h.reactions_on(hello).is_empty());
    assert!(h.carriers().is_empty());
}

// ============================================================================
// Locale and Ingest Tests
// ============================================================================

#[tokio::test]
async fn test_mixed_locales_in_one_thread() {
    let mut history = History::new();
    let plans = history.sms(ALICE, "Bis morgen");
    history.sms(BOB, "Hat „Bis morgen“ geliebt");
    history.sms(CAROL, "A ri de « Bis morgen »");
    history.sms(BOB, "Reacted 🎉 to “Bis morgen”");

    let h = TestHarness::new(history.messages()).unwrap();
    h.reconcile().await.unwrap();

    assert_eq!(h.emojis_on(plans), vec!["❤️", "😂", "🎉"]);
}

#[tokio::test]
async fn test_ingest_in_order_matches_reconcile() {
    let mut history = History::new();
    history.sms(ALICE, "Hello");
    history.sms(BOB, "Liked “Hello”");
    history.sms(CAROL, "Loved “Hello”");
    history.sms(BOB, "Removed a like from “Hello”");
    history.sms(BOB, "Questioned “Nope”");

    let incremental = TestHarness::new(history.messages()).unwrap();
    let mut outcomes = Vec::new();
    for message in history.messages() {
        outcomes.push(incremental.ingest(message.id).await.unwrap());
    }
    assert_eq!(outcomes[0], None);
    assert!(matches!(outcomes[3], Some(ApplyOutcome::Removed { .. })));

    let bulk = TestHarness::new(history.messages()).unwrap();
    bulk.reconcile().await.unwrap();

    assert_eq!(incremental.reaction_snapshot(), bulk.reaction_snapshot());
    assert_eq!(incremental.carriers(), bulk.carriers());
}
