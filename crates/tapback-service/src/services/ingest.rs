//! Interactive ingest
//!
//! Handles one newly stored message, for callers that process messages as
//! they arrive rather than replaying history.

use tapback_core::Snowflake;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reaction::{ApplyOutcome, ReactionService};

/// Ingest service
pub struct IngestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IngestService<'a> {
    /// Create a new IngestService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply the reaction carried by a stored message, if any
    #[instrument(skip(self))]
    pub async fn process_incoming(&self, message_id: Snowflake) -> ServiceResult<Option<ApplyOutcome>> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id.to_string()))?;

        let outcome = ReactionService::new(self.ctx).process(&message).await?;
        if outcome.is_none() {
            debug!("Message is not a reaction");
        }
        Ok(outcome)
    }
}
