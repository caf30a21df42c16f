//! Reaction types - parsed tapbacks and the records derived from them

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Fixed-vocabulary tapback reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TapbackKind {
    Loved,
    Liked,
    Disliked,
    Laughed,
    Emphasized,
    Questioned,
}

impl TapbackKind {
    /// All kinds, in catalog order
    pub const ALL: [TapbackKind; 6] = [
        Self::Loved,
        Self::Liked,
        Self::Disliked,
        Self::Laughed,
        Self::Emphasized,
        Self::Questioned,
    ];

    /// Emoji this tapback is recorded as
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Loved => "❤️",
            Self::Liked => "👍",
            Self::Disliked => "👎",
            Self::Laughed => "😂",
            Self::Emphasized => "‼️",
            Self::Questioned => "❓",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loved => "loved",
            Self::Liked => "liked",
            Self::Disliked => "disliked",
            Self::Laughed => "laughed",
            Self::Emphasized => "emphasized",
            Self::Questioned => "questioned",
        }
    }
}

/// Result of matching a message body against the pattern catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReaction {
    pub emoji: String,
    pub original_message_text: String,
    pub is_removal: bool,
}

impl ParsedReaction {
    /// Create a reaction that adds `emoji`
    pub fn added(emoji: impl Into<String>, original_message_text: impl Into<String>) -> Self {
        Self {
            emoji: emoji.into(),
            original_message_text: original_message_text.into(),
            is_removal: false,
        }
    }

    /// Create a reaction that removes `emoji`
    pub fn removed(emoji: impl Into<String>, original_message_text: impl Into<String>) -> Self {
        Self {
            emoji: emoji.into(),
            original_message_text: original_message_text.into(),
            is_removal: true,
        }
    }
}

/// Persisted reaction, attached by id to its target message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub id: Snowflake,
    /// Id of the carrier message that encoded this reaction
    pub reaction_message_id: Snowflake,
    pub sender_address: String,
    pub emoji: String,
    pub original_message_text: String,
    pub thread_id: Snowflake,
}

impl ReactionRecord {
    /// Check if this record was left by `sender` with `emoji`
    #[inline]
    pub fn matches(&self, sender: &str, emoji: &str) -> bool {
        self.sender_address == sender && self.emoji == emoji
    }
}
