//! Target resolver
//!
//! Finds the message a reaction quotes: the most recent message in the
//! carrier's thread sent before the carrier. Matching is exact after
//! trimming surrounding whitespace, and case-sensitive.

use tapback_core::{Message, SortOrder};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Check if `candidate` was sent before `carrier`, ties broken by id
#[inline]
pub fn is_prior(candidate: &Message, carrier: &Message) -> bool {
    (candidate.date, candidate.id) < (carrier.date, carrier.id)
}

/// Pick the reaction target from `messages`, which must be newest first
///
/// Messages sent after `carrier`, and the carrier itself, are never
/// candidates.
pub fn select_target<'m>(messages: &'m [Message], carrier: &Message, quoted_text: &str) -> Option<&'m Message> {
    let quoted = quoted_text.trim();
    messages
        .iter()
        .filter(|m| is_prior(m, carrier))
        .find(|m| m.text().trim() == quoted)
}

/// Target resolver
pub struct TargetResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TargetResolver<'a> {
    /// Create a new TargetResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Most recent message before `carrier` in its thread whose text
    /// matches `quoted_text`
    #[instrument(skip(self, carrier, quoted_text), fields(carrier_id = %carrier.id, thread_id = %carrier.thread_id))]
    pub async fn find_target(&self, carrier: &Message, quoted_text: &str) -> ServiceResult<Option<Message>> {
        let messages = self
            .ctx
            .message_repo()
            .find_by_thread(carrier.thread_id, SortOrder::Descending)
            .await?;

        let target = select_target(&messages, carrier, quoted_text).cloned();
        debug!(
            candidates = messages.len(),
            target_id = ?target.as_ref().map(|m| m.id),
            "Resolved reaction target"
        );
        Ok(target)
    }
}
