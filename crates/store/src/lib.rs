//! Local state of the synchronization: the custom format definitions authored on disk and the
//! record of which version of each definition was last pushed.

pub mod definition;
mod definition_repository;
mod store_error;
pub mod version;
mod version_store;

pub use definition::{Definition, DefinitionSpecification, SpecificationShapeError, TEMPLATE_FILENAME};
pub use definition_repository::DefinitionRepository;
pub use store_error::StoreError;
pub use version::{parse_version, VersionParseError};
pub use version_store::VersionStore;
