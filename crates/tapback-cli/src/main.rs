//! Reconciliation job entry point
//!
//! Run with:
//! ```bash
//! TAPBACK_HISTORY_PATH=history.json cargo run -p tapback-cli
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use tapback_common::{
    try_init_tracing, try_init_tracing_with_config, AppConfig, AppError, ErrorResponse, TracingConfig,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first; it selects the log format
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            fail(&AppError::from(e));
        }
    };

    let tracing_config = TracingConfig::for_environment(config.app.env, config.log.json);
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        history = %config.reconcile.history_path.display(),
        worker_id = config.reconcile.worker_id,
        "Configuration loaded"
    );

    if let Err(e) = tapback_cli::run(config).await {
        fail(&e);
    }
}

fn fail(err: &AppError) -> ! {
    error!(code = err.error_code(), error = %err, "Reconciliation failed");
    if let Ok(report) = serde_json::to_string(&ErrorResponse::from(err)) {
        eprintln!("{report}");
    }
    std::process::exit(err.exit_code());
}
