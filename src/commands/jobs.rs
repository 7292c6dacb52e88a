//! Jobs command - maintenance operations on postings.
//!
//! The expiry sweep is an externally-triggered batch update (run it from
//! cron or by hand), not an in-process scheduler:
//!
//! ```bash
//! cargo run -- jobs expire
//! ```

use std::sync::Arc;

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{JobManager, JobService};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Expire => expire_jobs(&config).await,
    }
}

/// Run the expiry sweep once.
///
/// Idempotent: a second run right after the first mutates nothing.
async fn expire_jobs(config: &Config) -> AppResult<()> {
    tracing::info!("Connecting to database...");

    let db = Database::connect_without_migrations(config)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    let uow = Arc::new(Persistence::new(db.get_connection()));
    let jobs = JobManager::new(uow);

    let expired = jobs.expire_old_jobs().await?;
    println!("Expired {} job(s).", expired);

    Ok(())
}
