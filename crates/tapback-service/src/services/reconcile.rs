//! Bulk reconciliation
//!
//! Rebuilds every reaction record from message history. Messages are
//! replayed oldest first so an add is always applied before the removal
//! that cancels it.

use serde::Serialize;
use tapback_core::ReactionEvent;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reaction::{ApplyOutcome, ReactionService};

/// Counts gathered during one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Records deleted before replay
    pub cleared: u64,
    /// Messages with text that were replayed
    pub scanned: usize,
    /// Messages that parsed as a reaction
    pub parsed: usize,
    pub added: usize,
    /// Added reactions whose target was not found
    pub orphaned: usize,
    pub removed: usize,
    pub unmatched_removals: usize,
    pub removals_without_target: usize,
    /// Reaction records in the store once replay finished
    pub records: usize,
}

impl ReconcileReport {
    /// Record one apply result
    pub fn record(&mut self, outcome: &ApplyOutcome) {
        self.parsed += 1;
        match outcome {
            ApplyOutcome::Added { attached, .. } => {
                self.added += 1;
                if !attached {
                    self.orphaned += 1;
                }
            }
            ApplyOutcome::Removed { .. } => self.removed += 1,
            ApplyOutcome::RemovalUnmatched => self.unmatched_removals += 1,
            ApplyOutcome::RemovalWithoutTarget => self.removals_without_target += 1,
        }
    }
}

/// Reconcile service
pub struct ReconcileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReconcileService<'a> {
    /// Create a new ReconcileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Discard all reaction state and replay every message
    ///
    /// Storage failures abort the run and propagate unchanged.
    #[instrument(skip(self))]
    pub async fn reconcile_all(&self) -> ServiceResult<ReconcileReport> {
        self.ctx.emit(ReactionEvent::ReconcileStarted);

        let mut report = ReconcileReport {
            cleared: self.ctx.reaction_repo().delete_all().await?,
            ..ReconcileReport::default()
        };
        self.ctx.message_repo().reset_reaction_state().await?;

        let messages = self.ctx.message_repo().find_with_text().await?;
        report.scanned = messages.len();

        let reactions = ReactionService::new(self.ctx);
        for message in &messages {
            if let Some(outcome) = reactions.process(message).await? {
                report.record(&outcome);
            }
        }
        report.records = self.ctx.reaction_repo().find_all().await?.len();

        info!(
            scanned = report.scanned,
            parsed = report.parsed,
            added = report.added,
            removed = report.removed,
            orphaned = report.orphaned,
            records = report.records,
            "Reconciliation finished"
        );
        self.ctx.emit(ReactionEvent::ReconcileFinished {
            scanned: report.scanned,
            parsed: report.parsed,
            records: report.records,
        });

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tapback_core::{
        CollectingObserver, DomainError, Message, MessageRepository, RepoResult, Snowflake, SortOrder,
    };
    use tapback_parser::{PatternCatalog, ReactionParser};
    use tapback_store::{InMemoryStore, MemMessageRepository, MemReactionRepository};

    fn parser() -> ReactionParser {
        ReactionParser::new(Arc::new(PatternCatalog::from_bundled().unwrap()))
    }

    fn msg(id: i64, from: &str, secs: i64, text: &str) -> Message {
        Message::new_sms(
            Snowflake::new(id),
            Snowflake::new(1),
            from,
            Utc.timestamp_opt(secs, 0).unwrap(),
            text,
        )
    }

    fn ctx(store: &InMemoryStore, observer: Arc<CollectingObserver>) -> ServiceContext {
        ServiceContext::builder()
            .message_repo(Arc::new(MemMessageRepository::new(store.clone())))
            .reaction_repo(Arc::new(MemReactionRepository::new(store.clone())))
            .parser(parser())
            .observer(observer)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_report_counts() {
        let store = InMemoryStore::from_messages([
            msg(1, "+1", 10, "Hello"),
            msg(2, "+2", 20, "Liked “Hello”"),
            msg(3, "+2", 30, "Loved “Missing”"),
            msg(4, "+2", 40, "Removed a like from “Hello”"),
            msg(5, "+2", 50, "Removed a heart from “Hello”"),
            msg(6, "+2", 60, "Removed a laugh from “Nowhere”"),
            msg(7, "+2", 70, "   "),
        ])
        .unwrap();
        let observer = Arc::new(CollectingObserver::new());

        let report = ReconcileService::new(&ctx(&store, observer.clone()))
            .reconcile_all()
            .await
            .unwrap();

        assert_eq!(
            report,
            ReconcileReport {
                cleared: 0,
                scanned: 6,
                parsed: 5,
                added: 2,
                orphaned: 1,
                removed: 1,
                unmatched_removals: 1,
                removals_without_target: 1,
                records: 1,
            }
        );
        assert_eq!(store.reactions().len(), report.records);
        assert!(observer.events().iter().any(|e| matches!(
            e,
            ReactionEvent::ReconcileFinished { records: 1, .. }
        )));
    }

    #[tokio::test]
    async fn test_clears_stale_state_first() {
        let store = InMemoryStore::from_messages([msg(1, "+1", 10, "Hello"), msg(2, "+2", 20, "Not a reaction")]).unwrap();
        let ctx = ctx(&store, Arc::new(CollectingObserver::new()));
        let stale = ReactionService::new(&ctx)
            .apply(&store.messages()[1], &tapback_core::ParsedReaction::added("👍", "Hello"), None)
            .await
            .unwrap();
        assert!(matches!(stale, ApplyOutcome::Added { .. }));

        let report = ReconcileService::new(&ctx).reconcile_all().await.unwrap();
        assert_eq!(report.cleared, 1);
        assert!(store.reactions().is_empty());
        assert!(store.messages().iter().all(|m| !m.is_emoji_reaction && m.reactions.is_empty()));
    }

    /// Message repository whose reads fail
    struct BrokenMessages;

    #[async_trait]
    impl MessageRepository for BrokenMessages {
        async fn find_by_id(&self, _id: Snowflake) -> RepoResult<Option<Message>> {
            Ok(None)
        }
        async fn find_by_thread(&self, _thread_id: Snowflake, _order: SortOrder) -> RepoResult<Vec<Message>> {
            Ok(Vec::new())
        }
        async fn find_with_text(&self) -> RepoResult<Vec<Message>> {
            Err(DomainError::StorageError("connection lost".to_string()))
        }
        async fn set_emoji_reaction(&self, _id: Snowflake, _is_reaction: bool) -> RepoResult<()> {
            Ok(())
        }
        async fn reset_reaction_state(&self) -> RepoResult<u64> {
            Ok(0)
        }
        async fn attach_reaction(&self, _message_id: Snowflake, _reaction_id: Snowflake) -> RepoResult<()> {
            Ok(())
        }
        async fn detach_reaction(&self, _message_id: Snowflake, _reaction_id: Snowflake) -> RepoResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let ctx = ServiceContext::builder()
            .message_repo(Arc::new(BrokenMessages))
            .reaction_repo(Arc::new(MemReactionRepository::new(InMemoryStore::new())))
            .parser(parser())
            .build()
            .unwrap();

        let err = ReconcileService::new(&ctx).reconcile_all().await.unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}
