use serde::{Deserialize, Serialize};

/// One row of the provider's country table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    #[serde(rename = "iso_3166_1")]
    pub code: String,
    #[serde(default)]
    pub english_name: Option<String>,
    pub native_name: String,
}
