//! Domain entities - messages and the reactions derived from them

mod message;
mod reaction;

pub use message::{Message, MessageBody, MessagePart};
pub use reaction::{ParsedReaction, ReactionRecord, TapbackKind};
