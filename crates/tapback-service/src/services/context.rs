//! Service context - dependency container for services
//!
//! Holds the repositories, the reaction parser, the id generator, and the
//! observer that receives diagnostic events.

use std::sync::Arc;

use tapback_core::traits::{MessageRepository, ReactionRepository};
use tapback_core::{NoopObserver, ReactionEvent, ReactionObserver, Snowflake, SnowflakeGenerator};
use tapback_parser::ReactionParser;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    message_repo: Arc<dyn MessageRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Parsing
    parser: ReactionParser,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
    observer: Arc<dyn ReactionObserver>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        parser: ReactionParser,
        snowflake_generator: Arc<SnowflakeGenerator>,
        observer: Arc<dyn ReactionObserver>,
    ) -> Self {
        Self {
            message_repo,
            reaction_repo,
            parser,
            snowflake_generator,
            observer,
        }
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Parsing ===

    pub fn parser(&self) -> &ReactionParser {
        &self.parser
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Deliver a diagnostic event to the observer
    pub fn emit(&self, event: ReactionEvent) {
        self.observer.observe(event);
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("locales", &self.parser.catalog().locales())
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// The observer defaults to [`NoopObserver`] and the id generator to
/// worker 0.
pub struct ServiceContextBuilder {
    message_repo: Option<Arc<dyn MessageRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    parser: Option<ReactionParser>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    observer: Option<Arc<dyn ReactionObserver>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            message_repo: None,
            reaction_repo: None,
            parser: None,
            snowflake_generator: None,
            observer: None,
        }
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn parser(mut self, parser: ReactionParser) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ReactionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository or the parser is
    /// missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.parser
                .ok_or_else(|| ServiceError::validation("parser is required"))?,
            self.snowflake_generator.unwrap_or_default(),
            self.observer.unwrap_or_else(|| Arc::new(NoopObserver)),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
