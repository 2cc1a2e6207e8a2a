use cfsync_store::StoreError;
use thiserror::Error;

/// Failures that abort the whole run. Failures local to one definition or instance are logged
/// and recorded in the [crate::SyncReport] instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
