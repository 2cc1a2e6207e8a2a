//! Semantic version handling for definitions and the version store.

use semver::{BuildMetadata, Version};
use thiserror::Error;

/// The version assumed for definitions that don't declare one and files never synced.
pub const DEFAULT_VERSION: &str = "0.0.0";

#[derive(Debug, Error)]
#[error("\"{raw}\" is not a valid semantic version.")]
pub struct VersionParseError {
    pub raw: String,
    #[source]
    source: semver::Error,
}

/// Parse a `major.minor.patch[-pre][+build]` version. Build metadata is dropped so that the
/// ordering of the result follows semantic version precedence.
pub fn parse_version(raw: &str) -> Result<Version, VersionParseError> {
    let mut version = Version::parse(raw).map_err(|source| VersionParseError {
        raw: String::from(raw),
        source,
    })?;
    version.build = BuildMetadata::EMPTY;
    Ok(version)
}
