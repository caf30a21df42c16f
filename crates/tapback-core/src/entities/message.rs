//! Message entity - an SMS or MMS message as held by the message store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Content type of MMS parts that contribute to the rendered text
pub const TEXT_PLAIN: &str = "text/plain";

/// A single MMS part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    pub content_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagePart {
    /// Create a `text/plain` part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: TEXT_PLAIN.to_string(),
            text: Some(text.into()),
        }
    }

    /// Create a non-text part (image, vcard, ...)
    pub fn media(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            text: None,
        }
    }

    /// Check if this part carries renderable text
    #[inline]
    pub fn is_text(&self) -> bool {
        self.content_type == TEXT_PLAIN && self.text.is_some()
    }
}

/// Message payload, either a simple SMS body or a list of MMS parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageBody {
    Sms { text: String },
    Mms { parts: Vec<MessagePart> },
}

impl MessageBody {
    /// Render the plain text of the body
    ///
    /// MMS text parts are joined with a newline; non-text parts are skipped.
    pub fn render(&self) -> String {
        match self {
            Self::Sms { text } => text.clone(),
            Self::Mms { parts } => parts
                .iter()
                .filter(|part| part.is_text())
                .filter_map(|part| part.text.as_deref())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub thread_id: Snowflake,
    pub address: String,
    pub date: DateTime<Utc>,
    pub body: MessageBody,
    /// Set when this message carries a reaction rather than normal text
    #[serde(default)]
    pub is_emoji_reaction: bool,
    /// Ids of reaction records attached to this message
    #[serde(default)]
    pub reactions: Vec<Snowflake>,
}

impl Message {
    /// Create a new SMS message
    pub fn new_sms(
        id: Snowflake,
        thread_id: Snowflake,
        address: impl Into<String>,
        date: DateTime<Utc>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            thread_id,
            address: address.into(),
            date,
            body: MessageBody::Sms { text: text.into() },
            is_emoji_reaction: false,
            reactions: Vec::new(),
        }
    }

    /// Create a new MMS message
    pub fn new_mms(
        id: Snowflake,
        thread_id: Snowflake,
        address: impl Into<String>,
        date: DateTime<Utc>,
        parts: Vec<MessagePart>,
    ) -> Self {
        Self {
            id,
            thread_id,
            address: address.into(),
            date,
            body: MessageBody::Mms { parts },
            is_emoji_reaction: false,
            reactions: Vec::new(),
        }
    }

    /// Rendered plain text of the message
    pub fn text(&self) -> String {
        self.body.render()
    }

    /// Check if the rendered text has any non-whitespace content
    pub fn has_text(&self) -> bool {
        !self.text().trim().is_empty()
    }

    #[inline]
    pub fn is_mms(&self) -> bool {
        matches!(self.body, MessageBody::Mms { .. })
    }

    /// Check if a reaction record is attached to this message
    #[inline]
    pub fn has_reaction(&self, reaction_id: Snowflake) -> bool {
        self.reactions.contains(&reaction_id)
    }

    /// Attach a reaction record
    pub fn attach_reaction(&mut self, reaction_id: Snowflake) {
        self.reactions.push(reaction_id);
    }

    /// Detach a reaction record, returning whether it was attached
    pub fn detach_reaction(&mut self, reaction_id: Snowflake) -> bool {
        let before = self.reactions.len();
        self.reactions.retain(|id| *id != reaction_id);
        self.reactions.len() != before
    }

    /// Clear the carrier flag and all attached reactions
    pub fn clear_reaction_state(&mut self) {
        self.is_emoji_reaction = false;
        self.reactions.clear();
    }
}
