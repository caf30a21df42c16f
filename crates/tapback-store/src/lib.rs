//! # tapback-store
//!
//! Storage layer implementing the `tapback-core` repository traits over an
//! in-memory message store.
//!
//! ## Overview
//!
//! - [`InMemoryStore`]: shared message and reaction state, seeded from a
//!   list of messages or a JSON history file
//! - Repository implementations that borrow a handle to the store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tapback_store::{InMemoryStore, MemMessageRepository, MemReactionRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::load_json("history.json").await?;
//!     let message_repo = MemMessageRepository::new(store.clone());
//!     let reaction_repo = MemReactionRepository::new(store.clone());
//!
//!     // Use the repositories...
//!     Ok(())
//! }
//! ```

pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use repositories::{MemMessageRepository, MemReactionRepository};
pub use store::InMemoryStore;
