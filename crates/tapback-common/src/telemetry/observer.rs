//! Bridges [`ReactionEvent`]s into `tracing`

use tapback_core::{ReactionEvent, ReactionObserver};
use tracing::{debug, info, warn};

/// Logs every reaction event at a level matching its severity
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ReactionObserver for TracingObserver {
    fn observe(&self, event: ReactionEvent) {
        match event {
            ReactionEvent::LocaleSkipped { locale, reason } => {
                warn!(locale = %locale, reason = %reason, "Skipping locale");
            }
            ReactionEvent::LocaleDiscoveryFailed { reason } => {
                warn!(reason = %reason, "Locale discovery failed, using English only");
            }
            ReactionEvent::CatalogBuilt {
                locales,
                added_patterns,
                removed_patterns,
            } => {
                let locales: Vec<_> = locales.iter().map(ToString::to_string).collect();
                info!(
                    locales = ?locales,
                    added_patterns,
                    removed_patterns,
                    "Pattern catalog built"
                );
            }
            ReactionEvent::ReactionAdded {
                record_id,
                reaction_message_id,
                target_id,
                emoji,
            } => {
                debug!(
                    record_id = %record_id,
                    reaction_message_id = %reaction_message_id,
                    target_id = %target_id,
                    emoji = %emoji,
                    "Reaction added"
                );
            }
            ReactionEvent::OrphanedReaction {
                record_id,
                reaction_message_id,
                thread_id,
                emoji,
                original_message_text,
            } => {
                warn!(
                    record_id = %record_id,
                    reaction_message_id = %reaction_message_id,
                    thread_id = %thread_id,
                    emoji = %emoji,
                    original_message_text = %original_message_text,
                    "Target message not found, reaction stored without a target"
                );
            }
            ReactionEvent::ReactionRemoved {
                record_id,
                reaction_message_id,
                target_id,
                emoji,
            } => {
                debug!(
                    record_id = %record_id,
                    reaction_message_id = %reaction_message_id,
                    target_id = %target_id,
                    emoji = %emoji,
                    "Reaction removed"
                );
            }
            ReactionEvent::RemovalUnmatched {
                reaction_message_id,
                target_id,
                emoji,
            } => {
                debug!(
                    reaction_message_id = %reaction_message_id,
                    target_id = %target_id,
                    emoji = %emoji,
                    "No matching reaction to remove"
                );
            }
            ReactionEvent::RemovalWithoutTarget {
                reaction_message_id,
                thread_id,
                emoji,
                original_message_text,
            } => {
                warn!(
                    reaction_message_id = %reaction_message_id,
                    thread_id = %thread_id,
                    emoji = %emoji,
                    original_message_text = %original_message_text,
                    "Target message not found for removal"
                );
            }
            ReactionEvent::ReconcileStarted => info!("Reconciling reactions"),
            ReactionEvent::ReconcileFinished {
                scanned,
                parsed,
                records,
            } => {
                info!(scanned, parsed, records, "Reconciliation finished");
            }
        }
    }
}
