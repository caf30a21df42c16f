//! Shared in-memory message store

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tapback_core::{DomainError, Message, ReactionRecord, RepoResult, Snowflake};
use tracing::{debug, instrument};

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) messages: HashMap<Snowflake, Message>,
    /// Reaction records in creation order
    pub(crate) reactions: Vec<ReactionRecord>,
}

impl StoreState {
    pub(crate) fn message_mut(&mut self, id: Snowflake) -> RepoResult<&mut Message> {
        self.messages
            .get_mut(&id)
            .ok_or(DomainError::MessageNotFound(id))
    }
}

/// Cloneable handle to shared message and reaction state
///
/// Every clone sees the same data. Locks are held only for the duration
/// of a single repository call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with `messages`; duplicate ids are rejected
    pub fn from_messages(messages: impl IntoIterator<Item = Message>) -> RepoResult<Self> {
        let mut state = StoreState::default();
        for message in messages {
            let id = message.id;
            if state.messages.insert(id, message).is_some() {
                return Err(DomainError::ValidationError(format!("duplicate message id {id}")));
            }
        }

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Seed a store from a JSON array of messages
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load_json(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {e}", path.display())))?;
        let messages: Vec<Message> = serde_json::from_str(&raw)?;

        debug!(count = messages.len(), "Loaded message history");
        Self::from_messages(messages)
    }

    /// Add or replace a message
    pub fn insert_message(&self, message: Message) {
        self.state.write().messages.insert(message.id, message);
    }

    /// Snapshot of every message, oldest first (ties broken by id)
    pub fn messages(&self) -> Vec<Message> {
        let mut messages: Vec<_> = self.state.read().messages.values().cloned().collect();
        messages.sort_by_key(|m| (m.date, m.id));
        messages
    }

    /// Snapshot of every reaction record, in creation order
    pub fn reactions(&self) -> Vec<ReactionRecord> {
        self.state.read().reactions.clone()
    }

    pub fn message_count(&self) -> usize {
        self.state.read().messages.len()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.state.read())
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        f(&mut self.state.write())
    }
}
