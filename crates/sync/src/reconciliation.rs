//! Reconciles a local definition with the custom formats already present on an instance.

use crate::report::LegResult;
use crate::score::propagate_score;
use cfsync_arr_api::{ArrClient, CustomFormat, TransportError};
use cfsync_common::{ArrFamily, Instance};
use cfsync_store::{Definition, SpecificationShapeError};
use tracing::{debug, error, info};

/// What happened to the remote custom format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChange {
    Created,
    Updated,
    /// The remote format already matched the definition; nothing was written.
    Unchanged,
}

/// Whether `definition` should be pushed to `instance`. An explicit instance list takes
/// precedence over the per-family switches.
pub fn should_sync_to_instance(definition: &Definition, instance: &Instance) -> bool {
    match &definition.instance_filter {
        Some(filter) => filter.contains(&instance.name) || filter.contains(instance.ordinal()),
        None => match instance.family {
            ArrFamily::Radarr => definition.sync_radarr,
            ArrFamily::Sonarr => definition.sync_sonarr,
        },
    }
}

/// Build the custom format to send for `definition`. Only the synchronized properties are
/// carried over and the `id` is left for the instance to assign.
pub fn prepare_payload(definition: &Definition) -> Result<CustomFormat, SpecificationShapeError> {
    let specifications = definition
        .specifications
        .iter()
        .map(|s| s.normalize())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CustomFormat {
        id: None,
        name: definition.name.clone(),
        include_custom_format_when_renaming: definition.include_custom_format_when_renaming,
        specifications,
    })
}

/// Pushes definitions to a single instance.
pub struct ReconciliationEngine<'a, C: ArrClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ArrClient + ?Sized> ReconciliationEngine<'a, C> {
    pub fn new(client: &'a C) -> Self {
        ReconciliationEngine { client }
    }

    /// Create or update the custom format described by `definition` and, if it declares a score,
    /// apply that score to every quality profile using the format.
    ///
    /// A definition whose specifications can't be normalized yields
    /// [LegResult::InvalidSpecification] without touching the instance.
    pub async fn sync_definition(&self, definition: &Definition) -> Result<LegResult, TransportError> {
        let payload = match prepare_payload(definition) {
            Ok(p) => p,
            Err(e) => {
                error!(error = %e, "Invalid fields format for specification.");
                return Ok(LegResult::InvalidSpecification);
            }
        };

        let existing = self.client.list_custom_formats().await?;
        let (synced, change) = self.reconcile(&existing, payload).await?;

        let profiles_updated = match definition.score {
            Some(score) => propagate_score(self.client, &synced, score).await?,
            None => 0,
        };

        Ok(LegResult::Synced {
            change,
            profiles_updated,
        })
    }

    /// Match `payload` to an existing format by exact name. An existing format lends its `id` to
    /// the payload and is only written if they differ; otherwise the format is created.
    pub async fn reconcile(
        &self,
        existing: &[CustomFormat],
        mut payload: CustomFormat,
    ) -> Result<(CustomFormat, FormatChange), TransportError> {
        match existing.iter().find(|f| f.name == payload.name) {
            Some(current) => {
                payload.id = current.id;
                if &payload == current {
                    debug!(name = %payload.name, "Custom format is already up to date.");
                    return Ok((current.clone(), FormatChange::Unchanged));
                }

                let updated = self.client.upsert_custom_format(&payload).await?;
                info!(name = %updated.name, id = ?updated.id, "Updated custom format.");
                Ok((updated, FormatChange::Updated))
            }
            None => {
                let created = self.client.upsert_custom_format(&payload).await?;
                info!(name = %created.name, id = ?created.id, "Created new custom format.");
                Ok((created, FormatChange::Created))
            }
        }
    }
}
