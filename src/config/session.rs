use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Session backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
#[serde(tag = "type")]
pub enum SessionConfig {
    #[default]
    #[serde(rename = "memory")]
    Memory,
}
