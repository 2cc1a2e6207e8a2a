use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A quality profile. Profiles are always written back whole, so every property that isn't
/// needed for score propagation is carried along untouched in `other`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfile {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub format_items: Vec<FormatItem>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The score a [QualityProfile] assigns to one custom format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FormatItem {
    /// The `id` of the custom format.
    pub format: i32,
    pub score: i32,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl FormatItem {
    pub fn new(format: i32, score: i32) -> Self {
        FormatItem {
            format,
            score,
            other: Map::new(),
        }
    }
}
