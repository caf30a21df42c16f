//! # tapback-cli
//!
//! Wires configuration, the pattern catalog, the in-memory store, and the
//! reconcile service into a single job.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tapback_common::{AppConfig, AppError, AppResult, ReconcileConfig, TracingObserver};
use tapback_core::{ReactionObserver, ReactionRecord, SnowflakeGenerator};
use tapback_parser::{
    build_catalog_for, install_global, BundledStrings, JsonStringsProvider, PatternCatalog, ReactionParser,
    StringsError,
};
use tapback_service::{ReconcileReport, ReconcileService, ServiceContext, ServiceError};
use tapback_store::{InMemoryStore, MemMessageRepository, MemReactionRepository};
use tracing::{info, instrument};

/// Result of one reconciliation job
#[derive(Debug, Clone, Serialize)]
pub struct JobOutput {
    pub report: ReconcileReport,
    pub reactions: Vec<ReactionRecord>,
}

/// Run the job: build and install the catalog, reconcile, write output
pub async fn run(config: AppConfig) -> AppResult<()> {
    let observer: Arc<dyn ReactionObserver> = Arc::new(TracingObserver);

    let catalog = load_catalog(&config.reconcile, observer.as_ref())?;
    let catalog = install_global(catalog).map_err(ServiceError::from)?;

    let output = reconcile(&config.reconcile, catalog, observer).await?;
    info!(
        report = %serde_json::to_string(&output.report).unwrap_or_default(),
        "Reconcile report"
    );
    write_output(config.reconcile.output_path.as_deref(), &output.reactions).await
}

/// Build the pattern catalog from the configured string tables
pub fn load_catalog(config: &ReconcileConfig, observer: &dyn ReactionObserver) -> AppResult<PatternCatalog> {
    let catalog = match &config.strings_dir {
        Some(dir) => {
            let strings = JsonStringsProvider::open(dir).map_err(strings_error)?;
            build_catalog_for(&strings, &strings, observer, &config.locales)
        }
        None => {
            let strings = BundledStrings::new();
            build_catalog_for(&strings, &strings, observer, &config.locales)
        }
    };

    Ok(catalog.map_err(ServiceError::from)?)
}

/// Load the history file and rebuild every reaction record
#[instrument(skip_all, fields(history = %config.history_path.display()))]
pub async fn reconcile(
    config: &ReconcileConfig,
    catalog: Arc<PatternCatalog>,
    observer: Arc<dyn ReactionObserver>,
) -> AppResult<JobOutput> {
    let store = InMemoryStore::load_json(&config.history_path).await?;
    info!(messages = store.message_count(), "History loaded");

    let ctx = ServiceContext::builder()
        .message_repo(Arc::new(MemMessageRepository::new(store.clone())))
        .reaction_repo(Arc::new(MemReactionRepository::new(store.clone())))
        .parser(ReactionParser::new(catalog))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.worker_id)))
        .observer(observer)
        .build()?;

    let report = ReconcileService::new(&ctx).reconcile_all().await?;
    Ok(JobOutput {
        report,
        reactions: store.reactions(),
    })
}

async fn write_output(path: Option<&Path>, reactions: &[ReactionRecord]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(reactions).map_err(AppError::internal)?;
    match path {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            info!(path = %path.display(), count = reactions.len(), "Reactions written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn strings_error(err: StringsError) -> AppError {
    match err {
        StringsError::Io { .. } => AppError::NotFound(err.to_string()),
        other => AppError::validation(other),
    }
}
