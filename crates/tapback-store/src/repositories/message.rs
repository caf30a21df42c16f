//! In-memory implementation of MessageRepository

use async_trait::async_trait;
use tracing::instrument;

use tapback_core::entities::Message;
use tapback_core::traits::{MessageRepository, RepoResult, SortOrder};
use tapback_core::value_objects::Snowflake;
use tapback_core::DomainError;

use crate::store::InMemoryStore;

/// In-memory implementation of MessageRepository
#[derive(Clone)]
pub struct MemMessageRepository {
    store: InMemoryStore,
}

impl MemMessageRepository {
    /// Create a new MemMessageRepository
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for MemMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.store.read(|state| state.messages.get(&id).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_by_thread(&self, thread_id: Snowflake, order: SortOrder) -> RepoResult<Vec<Message>> {
        let mut messages: Vec<_> = self.store.read(|state| {
            state
                .messages
                .values()
                .filter(|m| m.thread_id == thread_id)
                .cloned()
                .collect()
        });

        messages.sort_by_key(|m| (m.date, m.id));
        if order == SortOrder::Descending {
            messages.reverse();
        }
        Ok(messages)
    }

    #[instrument(skip(self))]
    async fn find_with_text(&self) -> RepoResult<Vec<Message>> {
        let mut messages: Vec<_> = self.store.read(|state| {
            state
                .messages
                .values()
                .filter(|m| m.has_text())
                .cloned()
                .collect()
        });

        messages.sort_by_key(|m| (m.date, m.id));
        Ok(messages)
    }

    #[instrument(skip(self))]
    async fn set_emoji_reaction(&self, id: Snowflake, is_reaction: bool) -> RepoResult<()> {
        self.store.write(|state| -> RepoResult<()> {
            state.message_mut(id)?.is_emoji_reaction = is_reaction;
            Ok(())
        })
    }

    #[instrument(skip(self))]
    async fn reset_reaction_state(&self) -> RepoResult<u64> {
        let reset = self.store.write(|state| {
            let mut reset = 0_u64;
            for message in state.messages.values_mut() {
                if message.is_emoji_reaction || !message.reactions.is_empty() {
                    message.clear_reaction_state();
                    reset += 1;
                }
            }
            reset
        });
        Ok(reset)
    }

    #[instrument(skip(self))]
    async fn attach_reaction(&self, message_id: Snowflake, reaction_id: Snowflake) -> RepoResult<()> {
        self.store.write(|state| -> RepoResult<()> {
            if !state.reactions.iter().any(|r| r.id == reaction_id) {
                return Err(DomainError::ReactionNotFound(reaction_id));
            }
            state.message_mut(message_id)?.attach_reaction(reaction_id);
            Ok(())
        })
    }

    #[instrument(skip(self))]
    async fn detach_reaction(&self, message_id: Snowflake, reaction_id: Snowflake) -> RepoResult<()> {
        self.store.write(|state| -> RepoResult<()> {
            state.message_mut(message_id)?.detach_reaction(reaction_id);
            Ok(())
        })
    }
}
