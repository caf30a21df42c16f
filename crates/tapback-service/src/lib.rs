//! # tapback-service
//!
//! Application layer: resolves reaction targets, applies parsed reactions
//! to the store, rebuilds every reaction from history, and handles single
//! incoming messages.

pub mod services;

pub use services::{
    select_target, ApplyOutcome, IngestService, ReactionService, ReconcileReport, ReconcileService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, TargetResolver,
};
