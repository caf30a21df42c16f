//! Reaction events - structured diagnostics emitted while building the
//! pattern catalog and applying reactions
//!
//! These events are used for:
//! - Logging (see `tapback_common::telemetry::TracingObserver`)
//! - Asserting on warning conditions in tests
//! - Summarizing a reconciliation run

use serde::{Deserialize, Serialize};

use crate::value_objects::{Locale, Snowflake};

/// All possible reaction events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionEvent {
    // =========================================================================
    // Catalog Events
    // =========================================================================
    LocaleSkipped {
        locale: Locale,
        reason: String,
    },
    LocaleDiscoveryFailed {
        reason: String,
    },
    CatalogBuilt {
        locales: Vec<Locale>,
        added_patterns: usize,
        removed_patterns: usize,
    },

    // =========================================================================
    // Apply Events
    // =========================================================================
    ReactionAdded {
        record_id: Snowflake,
        reaction_message_id: Snowflake,
        target_id: Snowflake,
        emoji: String,
    },
    /// Added reaction whose target message could not be found
    OrphanedReaction {
        record_id: Snowflake,
        reaction_message_id: Snowflake,
        thread_id: Snowflake,
        emoji: String,
        original_message_text: String,
    },
    ReactionRemoved {
        record_id: Snowflake,
        reaction_message_id: Snowflake,
        target_id: Snowflake,
        emoji: String,
    },
    /// Removal whose target exists but holds no matching reaction
    RemovalUnmatched {
        reaction_message_id: Snowflake,
        target_id: Snowflake,
        emoji: String,
    },
    /// Removal whose target message could not be found
    RemovalWithoutTarget {
        reaction_message_id: Snowflake,
        thread_id: Snowflake,
        emoji: String,
        original_message_text: String,
    },

    // =========================================================================
    // Reconcile Events
    // =========================================================================
    ReconcileStarted,
    ReconcileFinished {
        scanned: usize,
        parsed: usize,
        records: usize,
    },
}

impl ReactionEvent {
    /// Get the event type string
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::LocaleSkipped { .. } => "LOCALE_SKIPPED",
            Self::LocaleDiscoveryFailed { .. } => "LOCALE_DISCOVERY_FAILED",
            Self::CatalogBuilt { .. } => "CATALOG_BUILT",
            Self::ReactionAdded { .. } => "REACTION_ADDED",
            Self::OrphanedReaction { .. } => "ORPHANED_REACTION",
            Self::ReactionRemoved { .. } => "REACTION_REMOVED",
            Self::RemovalUnmatched { .. } => "REMOVAL_UNMATCHED",
            Self::RemovalWithoutTarget { .. } => "REMOVAL_WITHOUT_TARGET",
            Self::ReconcileStarted => "RECONCILE_STARTED",
            Self::ReconcileFinished { .. } => "RECONCILE_FINISHED",
        }
    }

    /// Check if the event reports a degraded but non-fatal condition
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::LocaleSkipped { .. }
                | Self::LocaleDiscoveryFailed { .. }
                | Self::OrphanedReaction { .. }
                | Self::RemovalWithoutTarget { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = ReactionEvent::RemovalUnmatched {
            reaction_message_id: Snowflake::new(1),
            target_id: Snowflake::new(2),
            emoji: "👍".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("REMOVAL_UNMATCHED"));

        let parsed: ReactionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_warning_classification() {
        assert!(ReactionEvent::LocaleDiscoveryFailed { reason: "io".to_string() }.is_warning());
        assert!(!ReactionEvent::ReconcileStarted.is_warning());
        assert_eq!(ReactionEvent::ReconcileStarted.event_type(), "RECONCILE_STARTED");
    }
}
