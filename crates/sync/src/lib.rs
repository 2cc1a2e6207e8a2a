//! Decides which custom format definitions need pushing and reconciles them with the
//! Radarr/Sonarr instances.

pub mod planner;
pub mod reconciliation;
mod report;
pub mod score;
mod sync_error;
mod syncer;

pub use planner::{latest_version, plan, SyncDecision};
pub use reconciliation::{
    prepare_payload, should_sync_to_instance, FormatChange, ReconciliationEngine,
};
pub use report::{DefinitionOutcome, DefinitionReport, LegReport, LegResult, SyncReport};
pub use sync_error::SyncError;
pub use syncer::{SyncTarget, Syncer};
