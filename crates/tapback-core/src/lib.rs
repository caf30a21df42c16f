//! # tapback-core
//!
//! Domain layer for tapback reactions: messages, reaction records, parsed
//! reactions, value objects, repository traits, and diagnostic events.
//! This crate has no dependencies on storage or text-matching infrastructure.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, MessageBody, MessagePart, ParsedReaction, ReactionRecord, TapbackKind};
pub use error::DomainError;
pub use events::{CollectingObserver, NoopObserver, ReactionEvent, ReactionObserver};
pub use traits::{MessageRepository, ReactionRepository, RepoResult, SortOrder};
pub use value_objects::{Locale, LocaleParseError, Snowflake, SnowflakeGenerator, SnowflakeParseError};
