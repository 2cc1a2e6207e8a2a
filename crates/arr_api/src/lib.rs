//! Access to the custom format and quality profile endpoints of the Radarr/Sonarr v3 API.

use async_trait::async_trait;

mod http_client;
pub mod models;
mod transport_error;

pub use http_client::HttpArrClient;
pub use models::{CustomFormat, Field, FormatItem, QualityProfile, Specification};
pub use reqwest::Method;
pub use transport_error::TransportError;

/// The operations needed from a single Radarr or Sonarr instance. No retries happen at this
/// layer; a failed call is reported to the caller as a [TransportError].
#[async_trait]
pub trait ArrClient: Send + Sync {
    /// Retrieve every custom format on the instance.
    async fn list_custom_formats(&self) -> Result<Vec<CustomFormat>, TransportError>;

    /// Update the custom format if it carries an `id`, otherwise create it. Returns the format as
    /// stored by the instance.
    async fn upsert_custom_format(
        &self,
        custom_format: &CustomFormat,
    ) -> Result<CustomFormat, TransportError>;

    /// Retrieve every quality profile on the instance.
    async fn list_quality_profiles(&self) -> Result<Vec<QualityProfile>, TransportError>;

    /// Replace a quality profile with the given one in full.
    async fn update_quality_profile(
        &self,
        profile: &QualityProfile,
    ) -> Result<QualityProfile, TransportError>;
}
