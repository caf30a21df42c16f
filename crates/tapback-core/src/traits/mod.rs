//! Repository traits (ports) implemented by the storage layer

mod repositories;

pub use repositories::{MessageRepository, ReactionRepository, RepoResult, SortOrder};
