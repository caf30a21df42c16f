//! Repository implementations over [`InMemoryStore`](crate::InMemoryStore)

mod message;
mod reaction;

pub use message::MemMessageRepository;
pub use reaction::MemReactionRepository;
