//! Sustainability tips shown by the tip rotator.

use serde::{Deserialize, Serialize};

/// One tip: a short category label plus the tip body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipItem {
    pub category: String,
    #[serde(rename = "tip")]
    pub text: String,
}

impl TipItem {
    pub fn new(category: &str, text: &str) -> Self {
        Self {
            category: category.to_string(),
            text: text.to_string(),
        }
    }
}

/// On-disk layout of a tips file (`[[tips]]` array of tables)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TipsFile {
    #[serde(default)]
    pub tips: Vec<TipItem>,
}
