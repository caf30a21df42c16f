//! Repository traits (ports) - define the interface for message and
//! reaction storage
//!
//! The domain layer defines what it needs, and the storage layer provides
//! the implementation. Transaction boundaries belong to the caller: each
//! method is a single read or write against the store.

use async_trait::async_trait;

use crate::entities::{Message, ReactionRecord};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Ordering of messages by date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// List every message in a thread ordered by date
    async fn find_by_thread(&self, thread_id: Snowflake, order: SortOrder) -> RepoResult<Vec<Message>>;

    /// List every SMS and MMS message with non-empty rendered text,
    /// oldest first (ties broken by id)
    async fn find_with_text(&self) -> RepoResult<Vec<Message>>;

    /// Set or clear the reaction-carrier flag
    async fn set_emoji_reaction(&self, id: Snowflake, is_reaction: bool) -> RepoResult<()>;

    /// Clear the carrier flag and attached reactions on every message
    async fn reset_reaction_state(&self) -> RepoResult<u64>;

    /// Attach a reaction record to a message
    async fn attach_reaction(&self, message_id: Snowflake, reaction_id: Snowflake) -> RepoResult<()>;

    /// Detach a reaction record from a message
    async fn detach_reaction(&self, message_id: Snowflake, reaction_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find reaction by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ReactionRecord>>;

    /// Find reactions by ID, preserving the order of `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<ReactionRecord>>;

    /// List every reaction, in creation order
    async fn find_all(&self) -> RepoResult<Vec<ReactionRecord>>;

    /// Persist a new reaction
    async fn create(&self, reaction: &ReactionRecord) -> RepoResult<()>;

    /// Delete a reaction
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Delete every reaction
    async fn delete_all(&self) -> RepoResult<u64>;
}
