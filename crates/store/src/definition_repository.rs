use crate::definition::Definition;
use crate::StoreError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The directory of `*.json` custom format definitions.
pub struct DefinitionRepository {
    directory: PathBuf,
}

impl DefinitionRepository {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        DefinitionRepository {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Load every `*.json` file in the directory, keyed and ordered by filename. Other files are
    /// ignored.
    ///
    /// # Remarks
    ///
    /// The definitions are treated as one batch: a single unreadable or malformed file fails the
    /// whole load rather than letting the run continue with a partial set.
    pub fn load_all(&self) -> Result<BTreeMap<String, Definition>, StoreError> {
        let read_error = |source| StoreError::ReadDefinitions {
            path: self.directory.clone(),
            source,
        };

        let mut definitions = BTreeMap::new();
        for entry in fs::read_dir(&self.directory).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if !path.is_file() || path.extension().map_or(true, |e| e != "json") {
                continue;
            }
            let filename = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) => String::from(n),
                None => {
                    warn!(path = %path.display(), "Skipping definition with a non UTF-8 filename.");
                    continue;
                }
            };

            let raw = fs::read_to_string(&path).map_err(|source| StoreError::ReadDefinitions {
                path: path.clone(),
                source,
            })?;
            let definition = serde_json::from_str::<Definition>(&raw).map_err(|source| {
                StoreError::ParseDefinition {
                    filename: filename.clone(),
                    source,
                }
            })?;
            debug!(filename = %filename, name = %definition.name, "Loaded definition.");
            definitions.insert(filename, definition);
        }

        Ok(definitions)
    }
}
