//! Runs a synchronization of every definition against every instance.

use crate::planner::{latest_version, plan, SyncDecision};
use crate::reconciliation::{should_sync_to_instance, ReconciliationEngine};
use crate::report::{DefinitionOutcome, LegReport, LegResult, SyncReport};
use crate::SyncError;
use cfsync_arr_api::ArrClient;
use cfsync_common::Instance;
use cfsync_store::{Definition, DefinitionRepository, VersionStore, TEMPLATE_FILENAME};
use semver::Version;
use tracing::{error, info, info_span, warn, Instrument};

/// An instance paired with the client used to reach it.
pub struct SyncTarget<C> {
    pub instance: Instance,
    pub client: C,
}

impl<C: ArrClient> SyncTarget<C> {
    pub fn new(instance: Instance, client: C) -> Self {
        SyncTarget { instance, client }
    }
}

/// Pushes the local definitions to the instances, tracking in the [VersionStore] which version
/// of each definition was last pushed.
pub struct Syncer {
    repository: DefinitionRepository,
    store: VersionStore,
}

impl Syncer {
    pub fn new(repository: DefinitionRepository, store: VersionStore) -> Self {
        Syncer { repository, store }
    }

    /// Synchronize every due definition to every eligible target, one at a time.
    ///
    /// Failures of a single instance or definition are logged and recorded in the returned
    /// [SyncReport]. Only failing to load the definitions or to persist the version store aborts
    /// the run.
    pub async fn run<C: ArrClient>(&mut self, targets: &[SyncTarget<C>]) -> Result<SyncReport, SyncError> {
        let definitions = self.repository.load_all()?;
        let filenames: Vec<&str> = definitions
            .keys()
            .map(|f| f.as_str())
            .filter(|f| *f != TEMPLATE_FILENAME)
            .collect();
        let mut report = SyncReport::new(self.store.prune(&filenames)?);
        if filenames.is_empty() {
            warn!(
                directory = %self.repository.directory().display(),
                "No custom formats found to sync."
            );
            return Ok(report);
        }

        let latest = latest_version(&definitions);
        info!(latest = %latest, "Found the latest definition version.");

        for (filename, definition) in &definitions {
            let span = info_span!("definition", filename = %filename);
            let outcome = self
                .sync_definition(filename, definition, &latest, targets)
                .instrument(span)
                .await?;
            report.push(filename, outcome);
        }

        Ok(report)
    }

    async fn sync_definition<C: ArrClient>(
        &mut self,
        filename: &str,
        definition: &Definition,
        latest: &Version,
        targets: &[SyncTarget<C>],
    ) -> Result<DefinitionOutcome, SyncError> {
        if filename == TEMPLATE_FILENAME {
            info!("Skipping the template.");
            return Ok(DefinitionOutcome::Template);
        }

        let file_version = match definition.parsed_version() {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "Invalid version format in definition, skipping it.");
                return Ok(DefinitionOutcome::InvalidVersion);
            }
        };
        let stored_version = match self.store.stored_version(filename) {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "Invalid stored version for definition, skipping it.");
                return Ok(DefinitionOutcome::InvalidVersion);
            }
        };

        let decision = plan(&file_version, &stored_version, latest);
        match &decision {
            SyncDecision::UpToDate => {
                info!(version = %file_version, "No updates needed.");
                return Ok(DefinitionOutcome::UpToDate);
            }
            SyncDecision::CatchUp { latest } => warn!(
                version = %file_version,
                latest = %latest,
                "Definition is behind the latest version."
            ),
            SyncDecision::Newer { stored } => info!(
                version = %file_version,
                stored = %stored,
                "Definition has a new version."
            ),
        }

        let mut legs = Vec::with_capacity(targets.len());
        for target in targets {
            let span = info_span!("leg", instance = %target.instance.name);
            let result = sync_leg(definition, target).instrument(span).await;
            legs.push(LegReport {
                instance: target.instance.name.clone(),
                result,
            });
        }

        self.store.record_version(filename, &file_version)?;
        info!(version = %file_version, "Updated definition version.");

        Ok(DefinitionOutcome::Synced { decision, legs })
    }
}

async fn sync_leg<C: ArrClient>(definition: &Definition, target: &SyncTarget<C>) -> LegResult {
    if !should_sync_to_instance(definition, &target.instance) {
        info!("Skipping instance based on cfSync settings.");
        return LegResult::Ineligible;
    }

    let engine = ReconciliationEngine::new(&target.client);
    match engine.sync_definition(definition).await {
        Ok(result) => {
            if let LegResult::Synced {
                change,
                profiles_updated,
            } = &result
            {
                info!(change = ?change, profiles_updated = profiles_updated, "Synced definition.");
            }
            result
        }
        Err(e) => {
            error!(error = ?e, status = ?e.status(), "Error syncing definition.");
            LegResult::Failed {
                error: e.to_string(),
            }
        }
    }
}
