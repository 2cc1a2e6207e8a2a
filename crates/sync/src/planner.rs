//! Decides whether a definition is due to be pushed.

use cfsync_store::{parse_version, Definition, TEMPLATE_FILENAME};
use semver::Version;
use tracing::error;

/// Why a definition is or isn't pushed this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// Already synced at its declared version.
    UpToDate,
    /// Declares a newer version than the one last synced.
    Newer { stored: Version },
    /// Lags behind the newest version declared in the batch and is pushed again to keep all
    /// definitions aligned.
    CatchUp { latest: Version },
}

impl SyncDecision {
    pub fn is_due(&self) -> bool {
        !matches!(self, SyncDecision::UpToDate)
    }
}

/// A definition is due iff its version is newer than the stored one or older than the latest
/// version of the batch.
pub fn plan(file_version: &Version, stored_version: &Version, latest_version: &Version) -> SyncDecision {
    if file_version < latest_version {
        SyncDecision::CatchUp {
            latest: latest_version.clone(),
        }
    } else if file_version > stored_version {
        SyncDecision::Newer {
            stored: stored_version.clone(),
        }
    } else {
        SyncDecision::UpToDate
    }
}

/// The highest version declared by the definitions, `0.0.0` if there are none. The template and
/// definitions with invalid versions are left out.
pub fn latest_version<'a, I>(definitions: I) -> Version
where
    I: IntoIterator<Item = (&'a String, &'a Definition)>,
{
    let mut latest = Version::new(0, 0, 0);
    for (filename, definition) in definitions {
        if filename == TEMPLATE_FILENAME {
            continue;
        }
        match parse_version(&definition.version) {
            Ok(v) if v > latest => latest = v,
            Ok(_) => (),
            Err(e) => error!(filename = %filename, error = %e, "Invalid version in definition."),
        }
    }

    latest
}
