//! Models for the custom format and quality profile resources of the v3 API.
//! Source: https://github.com/Radarr/Radarr/tree/develop/src/Radarr.Api.V3

mod custom_format;
mod quality_profile;

pub use custom_format::{CustomFormat, Field, Specification};
pub use quality_profile::{FormatItem, QualityProfile};
