//! Reaction service
//!
//! Applies a parsed reaction to the store: creates or deletes the reaction
//! record, flags the carrier message, and maintains the target's attached
//! reactions.

use tapback_core::{Message, ParsedReaction, ReactionEvent, ReactionRecord, Snowflake};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::resolver::TargetResolver;

/// What applying a reaction did to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A record was created; `attached` is false for an orphan
    Added { record: ReactionRecord, attached: bool },
    /// The sender's matching record was deleted from the target
    Removed { record_id: Snowflake },
    /// The target holds no record from this sender with this emoji
    RemovalUnmatched,
    /// The removal's target could not be found
    RemovalWithoutTarget,
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Parse `carrier`, resolve its target, and apply the reaction
    ///
    /// Returns `None` when the carrier is an ordinary message.
    pub async fn process(&self, carrier: &Message) -> ServiceResult<Option<ApplyOutcome>> {
        let Some(reaction) = self.ctx.parser().parse(&carrier.text()) else {
            return Ok(None);
        };

        let target = TargetResolver::new(self.ctx)
            .find_target(carrier, &reaction.original_message_text)
            .await?;

        self.apply(carrier, &reaction, target.as_ref()).await.map(Some)
    }

    /// Apply a parsed reaction carried by `carrier` to `target`
    ///
    /// A missing target is not an error. The carrier is always flagged as a
    /// reaction; an added reaction without a target is kept as an orphan.
    #[instrument(
        skip(self, carrier, reaction, target),
        fields(carrier_id = %carrier.id, emoji = %reaction.emoji, removal = reaction.is_removal)
    )]
    pub async fn apply(
        &self,
        carrier: &Message,
        reaction: &ParsedReaction,
        target: Option<&Message>,
    ) -> ServiceResult<ApplyOutcome> {
        if reaction.is_removal {
            self.remove(carrier, reaction, target).await
        } else {
            self.add(carrier, reaction, target).await
        }
    }

    async fn add(
        &self,
        carrier: &Message,
        reaction: &ParsedReaction,
        target: Option<&Message>,
    ) -> ServiceResult<ApplyOutcome> {
        let record = ReactionRecord {
            id: self.ctx.generate_id(),
            reaction_message_id: carrier.id,
            sender_address: carrier.address.clone(),
            emoji: reaction.emoji.clone(),
            original_message_text: reaction.original_message_text.clone(),
            thread_id: carrier.thread_id,
        };

        self.ctx.reaction_repo().create(&record).await?;
        self.ctx.message_repo().set_emoji_reaction(carrier.id, true).await?;

        let Some(target) = target else {
            debug!(
                record_id = %record.id,
                thread_id = %carrier.thread_id,
                "Reaction target not found, keeping orphaned record"
            );
            self.ctx.emit(ReactionEvent::OrphanedReaction {
                record_id: record.id,
                reaction_message_id: carrier.id,
                thread_id: carrier.thread_id,
                emoji: record.emoji.clone(),
                original_message_text: record.original_message_text.clone(),
            });
            return Ok(ApplyOutcome::Added {
                record,
                attached: false,
            });
        };

        self.ctx.message_repo().attach_reaction(target.id, record.id).await?;

        info!(
            record_id = %record.id,
            target_id = %target.id,
            emoji = %record.emoji,
            "Reaction added"
        );
        self.ctx.emit(ReactionEvent::ReactionAdded {
            record_id: record.id,
            reaction_message_id: carrier.id,
            target_id: target.id,
            emoji: record.emoji.clone(),
        });

        Ok(ApplyOutcome::Added {
            record,
            attached: true,
        })
    }

    async fn remove(
        &self,
        carrier: &Message,
        reaction: &ParsedReaction,
        target: Option<&Message>,
    ) -> ServiceResult<ApplyOutcome> {
        let Some(target) = target else {
            self.ctx.message_repo().set_emoji_reaction(carrier.id, true).await?;
            debug!(thread_id = %carrier.thread_id, "Removal target not found");
            self.ctx.emit(ReactionEvent::RemovalWithoutTarget {
                reaction_message_id: carrier.id,
                thread_id: carrier.thread_id,
                emoji: reaction.emoji.clone(),
                original_message_text: reaction.original_message_text.clone(),
            });
            return Ok(ApplyOutcome::RemovalWithoutTarget);
        };

        let attached = self.ctx.reaction_repo().find_by_ids(&target.reactions).await?;
        let existing = attached
            .into_iter()
            .find(|record| record.matches(&carrier.address, &reaction.emoji));

        let outcome = match existing {
            Some(record) => {
                self.ctx.reaction_repo().delete(record.id).await?;
                self.ctx.message_repo().detach_reaction(target.id, record.id).await?;

                info!(
                    record_id = %record.id,
                    target_id = %target.id,
                    emoji = %record.emoji,
                    "Reaction removed"
                );
                self.ctx.emit(ReactionEvent::ReactionRemoved {
                    record_id: record.id,
                    reaction_message_id: carrier.id,
                    target_id: target.id,
                    emoji: record.emoji,
                });
                ApplyOutcome::Removed { record_id: record.id }
            }
            None => {
                info!(target_id = %target.id, "No matching reaction to remove");
                self.ctx.emit(ReactionEvent::RemovalUnmatched {
                    reaction_message_id: carrier.id,
                    target_id: target.id,
                    emoji: reaction.emoji.clone(),
                });
                ApplyOutcome::RemovalUnmatched
            }
        };

        self.ctx.message_repo().set_emoji_reaction(carrier.id, true).await?;
        Ok(outcome)
    }
}
