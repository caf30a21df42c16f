//! Test helpers for integration tests
//!
//! Provides a harness over a seeded in-memory store and the service layer.

use std::sync::Arc;

use anyhow::Result;
use tapback_core::{CollectingObserver, Message, ReactionRecord, Snowflake};
use tapback_parser::{PatternCatalog, ReactionParser};
use tapback_service::{ApplyOutcome, IngestService, ReconcileReport, ReconcileService, ServiceContext};
use tapback_store::{InMemoryStore, MemMessageRepository, MemReactionRepository};

/// Catalog built from the bundled string tables
pub fn bundled_catalog() -> Arc<PatternCatalog> {
    Arc::new(PatternCatalog::from_bundled().expect("bundled catalog"))
}

/// A store, an observer collecting every event, and a service context
pub struct TestHarness {
    pub store: InMemoryStore,
    pub observer: Arc<CollectingObserver>,
    pub ctx: ServiceContext,
}

impl TestHarness {
    /// Seed a harness using the bundled catalog
    pub fn new(messages: Vec<Message>) -> Result<Self> {
        Self::with_catalog(messages, bundled_catalog())
    }

    /// Seed a harness using a custom catalog
    pub fn with_catalog(messages: Vec<Message>, catalog: Arc<PatternCatalog>) -> Result<Self> {
        let store = InMemoryStore::from_messages(messages)?;
        let observer = Arc::new(CollectingObserver::new());
        let ctx = ServiceContext::builder()
            .message_repo(Arc::new(MemMessageRepository::new(store.clone())))
            .reaction_repo(Arc::new(MemReactionRepository::new(store.clone())))
            .parser(ReactionParser::new(catalog))
            .observer(observer.clone())
            .build()?;

        Ok(Self { store, observer, ctx })
    }

    pub async fn reconcile(&self) -> Result<ReconcileReport> {
        Ok(ReconcileService::new(&self.ctx).reconcile_all().await?)
    }

    pub async fn ingest(&self, message_id: Snowflake) -> Result<Option<ApplyOutcome>> {
        Ok(IngestService::new(&self.ctx).process_incoming(message_id).await?)
    }

    /// Store a newly arrived message, then ingest it
    pub async fn receive(&self, message: Message) -> Result<Option<ApplyOutcome>> {
        let id = message.id;
        self.store.insert_message(message);
        self.ingest(id).await
    }

    pub fn message(&self, id: Snowflake) -> Message {
        self.store
            .messages()
            .into_iter()
            .find(|m| m.id == id)
            .unwrap_or_else(|| panic!("message {id} not in store"))
    }

    pub fn reactions(&self) -> Vec<ReactionRecord> {
        self.store.reactions()
    }

    /// Records attached to a message, in attachment order
    pub fn reactions_on(&self, id: Snowflake) -> Vec<ReactionRecord> {
        let all = self.reactions();
        self.message(id)
            .reactions
            .iter()
            .filter_map(|rid| all.iter().find(|r| r.id == *rid).cloned())
            .collect()
    }

    /// Emojis attached to a message, in attachment order
    pub fn emojis_on(&self, id: Snowflake) -> Vec<String> {
        self.reactions_on(id).into_iter().map(|r| r.emoji).collect()
    }

    /// Every record with its id dropped, for comparing runs
    pub fn reaction_snapshot(&self) -> Vec<(Snowflake, String, String, String)> {
        let mut snapshot: Vec<_> = self
            .reactions()
            .into_iter()
            .map(|r| (r.reaction_message_id, r.sender_address, r.emoji, r.original_message_text))
            .collect();
        snapshot.sort();
        snapshot
    }

    /// Ids of messages flagged as reaction carriers
    pub fn carriers(&self) -> Vec<Snowflake> {
        self.store
            .messages()
            .into_iter()
            .filter(|m| m.is_emoji_reaction)
            .map(|m| m.id)
            .collect()
    }
}
