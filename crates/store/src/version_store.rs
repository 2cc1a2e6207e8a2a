use crate::version::{parse_version, VersionParseError, DEFAULT_VERSION};
use crate::StoreError;
use semver::Version;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Persistent record of the version each definition file was last synced at, stored as a JSON
/// object mapping filename to version. Every change is written through to disk immediately.
#[derive(Debug)]
pub struct VersionStore {
    path: PathBuf,
    versions: BTreeMap<String, String>,
}

impl VersionStore {
    /// Load the store from `path`. A missing, unreadable, or malformed file yields an empty store.
    pub fn load<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let versions = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(v) => v,
                Err(e) => {
                    warn!(path = %path.display(), error = ?e, "Malformed version store, starting fresh.");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No version store found, starting fresh.");
                BTreeMap::new()
            }
            Err(e) => {
                error!(path = %path.display(), error = ?e, "Could not read the version store, starting fresh.");
                BTreeMap::new()
            }
        };

        VersionStore { path, versions }
    }

    /// The raw version string recorded for `filename`, if any.
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.versions.get(filename).map(|v| v.as_str())
    }

    #[cfg(test)]
    fn filenames(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(|k| k.as_str())
    }

    /// The version `filename` was last synced at, `0.0.0` if it never was.
    pub fn stored_version(&self, filename: &str) -> Result<Version, VersionParseError> {
        parse_version(self.get(filename).unwrap_or(DEFAULT_VERSION))
    }

    /// Remove the entries of files that no longer exist, persisting the store if anything was
    /// removed. Returns the removed filenames.
    pub fn prune<S: AsRef<str>>(&mut self, current_filenames: &[S]) -> Result<Vec<String>, StoreError> {
        let current: HashSet<&str> = current_filenames.iter().map(|f| f.as_ref()).collect();
        let removed: Vec<String> = self
            .versions
            .keys()
            .filter(|k| !current.contains(k.as_str()))
            .cloned()
            .collect();
        if removed.is_empty() {
            return Ok(removed);
        }

        info!(removed = ?removed, "Removing versions of definitions that no longer exist.");
        for filename in &removed {
            self.versions.remove(filename);
        }
        self.save()?;

        Ok(removed)
    }

    /// Record that `filename` was synced at `version` and persist the store.
    pub fn record_version(&mut self, filename: &str, version: &Version) -> Result<(), StoreError> {
        self.versions
            .insert(String::from(filename), version.to_string());
        self.save()
    }

    /// Writes to `<path>.tmp`, then renames it to `<path>`.
    fn save(&self) -> Result<(), StoreError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.versions
            .serialize(&mut serializer)
            .map_err(StoreError::Serialize)?;

        let tmp = temporary_path(&self.path);
        fs::write(&tmp, buffer).map_err(|source| StoreError::Persist {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Persist {
            path: self.path.clone(),
            source,
        })
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
