mod logging_initialization;
mod sync_initialization;

extern crate dotenv;

use crate::logging_initialization::initialize_logging;
use crate::sync_initialization::{initialize_syncer, initialize_targets, SyncSettings};
use anyhow::{ensure, Context, Result};
use cfsync_common::discover_instances;
use dotenv::dotenv;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    let _log_guard = initialize_logging()?;

    info!("Starting custom format sync...");
    let result = run().await;
    match &result {
        Ok(_) => info!("Custom format sync finished."),
        Err(e) => error!(error = ?e, "An error occurred during sync."),
    }

    result
}

async fn run() -> Result<()> {
    let settings = SyncSettings::from_environment();
    let instances = discover_instances()?;
    ensure!(
        !instances.is_empty(),
        "No Radarr or Sonarr instances configured. Please check your environment variables."
    );

    let targets = initialize_targets(instances, &settings)?;
    let mut syncer = initialize_syncer(&settings);
    let report = syncer
        .run(&targets)
        .await
        .context("Failed to synchronize the custom formats.")?;

    info!(
        definitions = report.definitions.len(),
        synced = report.synced_count(),
        failed_legs = report.failed_leg_count(),
        pruned = report.pruned.len(),
        "Sync summary."
    );
    Ok(())
}
