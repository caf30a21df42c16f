//! Reaction services
//!
//! Each service borrows a [`ServiceContext`] and awaits its repository
//! calls strictly in sequence.

pub mod context;
pub mod error;
pub mod ingest;
pub mod reaction;
pub mod reconcile;
pub mod resolver;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ingest::IngestService;
pub use reaction::{ApplyOutcome, ReactionService};
pub use reconcile::{ReconcileReport, ReconcileService};
pub use resolver::{select_target, TargetResolver};
