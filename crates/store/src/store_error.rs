use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the local stores that compromise the whole run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read the definitions in {}.", .path.display())]
    ReadDefinitions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse the definition {filename}.")]
    ParseDefinition {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize the version store.")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write the version store to {}.", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
