//! In-memory implementation of ReactionRepository

use async_trait::async_trait;
use tracing::instrument;

use tapback_core::entities::ReactionRecord;
use tapback_core::traits::{ReactionRepository, RepoResult};
use tapback_core::value_objects::Snowflake;
use tapback_core::DomainError;

use crate::store::InMemoryStore;

/// In-memory implementation of ReactionRepository
#[derive(Clone)]
pub struct MemReactionRepository {
    store: InMemoryStore,
}

impl MemReactionRepository {
    /// Create a new MemReactionRepository
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReactionRepository for MemReactionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ReactionRecord>> {
        Ok(self
            .store
            .read(|state| state.reactions.iter().find(|r| r.id == id).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<ReactionRecord>> {
        Ok(self.store.read(|state| {
            ids.iter()
                .filter_map(|id| state.reactions.iter().find(|r| r.id == *id))
                .cloned()
                .collect()
        }))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<ReactionRecord>> {
        Ok(self.store.reactions())
    }

    #[instrument(skip(self, reaction), fields(reaction_id = %reaction.id))]
    async fn create(&self, reaction: &ReactionRecord) -> RepoResult<()> {
        self.store.write(|state| -> RepoResult<()> {
            if state.reactions.iter().any(|r| r.id == reaction.id) {
                return Err(DomainError::StorageError(format!(
                    "reaction {} already exists",
                    reaction.id
                )));
            }
            state.reactions.push(reaction.clone());
            Ok(())
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.store.write(|state| -> RepoResult<()> {
            let index = state
                .reactions
                .iter()
                .position(|r| r.id == id)
                .ok_or(DomainError::ReactionNotFound(id))?;
            state.reactions.remove(index);
            Ok(())
        })
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> RepoResult<u64> {
        let deleted = self.store.write(|state| {
            let count = state.reactions.len();
            state.reactions.clear();
            count
        });
        Ok(deleted as u64)
    }
}
