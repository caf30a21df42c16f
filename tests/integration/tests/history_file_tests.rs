//! Reconciliation of a history loaded from disk
//!
//! Run with: cargo test -p integration-tests --test history_file_tests

use std::sync::Arc;

use integration_tests::{bundled_catalog, History, ALICE, BOB};
use tapback_common::AppError;
use tapback_core::CollectingObserver;
use tapback_parser::ReactionParser;
use tapback_service::{ReconcileService, ServiceContext};
use tapback_store::{InMemoryStore, MemMessageRepository, MemReactionRepository};
use tempfile::TempDir;

fn context(store: &InMemoryStore, observer: Arc<CollectingObserver>) -> ServiceContext {
    ServiceContext::builder()
        .message_repo(Arc::new(MemMessageRepository::new(store.clone())))
        .reaction_repo(Arc::new(MemReactionRepository::new(store.clone())))
        .parser(ReactionParser::new(bundled_catalog()))
        .observer(observer)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_reconcile_history_file() {
    let mut history = History::new();
    let dinner = history.sms(ALICE, "Dinner at 8?");
    history.sms(BOB, "Liked “Dinner at 8?”");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, serde_json::to_string(&history.messages()).unwrap()).unwrap();

    let store = InMemoryStore::load_json(&path).await.unwrap();
    let observer = Arc::new(CollectingObserver::new());
    let report = ReconcileService::new(&context(&store, observer.clone()))
        .reconcile_all()
        .await
        .unwrap();

    assert_eq!(report.added, 1);
    let records = store.reactions();
    assert_eq!(records.len(), 1);
    let target = store.messages().into_iter().find(|m| m.id == dinner).unwrap();
    assert_eq!(target.reactions, vec![records[0].id]);
    assert_eq!(observer.count("RECONCILE_FINISHED"), 1);

    // Records serialize with string ids
    let json = serde_json::to_value(&records).unwrap();
    assert!(json[0]["id"].is_string());
}

#[tokio::test]
async fn test_malformed_history_maps_to_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, r#"[{"id": "1"}]"#).unwrap();

    let err = AppError::from(InMemoryStore::load_json(&path).await.unwrap_err());
    assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    assert_eq!(err.exit_code(), 70);
}
