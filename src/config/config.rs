use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::gate::GateConfig;
use super::logging::LoggingConfig;
use super::session::SessionConfig;

/// Environment variables with this prefix override values from the YAML file.
/// Nested keys are separated by a double underscore, e.g. `GALLERYGUARD_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "GALLERYGUARD_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

impl Config {
    // handle configuration migration between versions here when necessary
    pub fn into_latest(self) -> ConfigV1 {
        match self {
            Config::ConfigV1(c) => c,
        }
    }
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Load config from a YAML file, with `GALLERYGUARD_*` environment overrides on top.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    figment.extract::<Config>().map(Config::into_latest)
}

/// Parse config from an in-memory YAML document.
pub fn parse_config(yaml: &str) -> Result<ConfigV1, figment::Error> {
    Figment::new()
        .merge(Yaml::string(yaml))
        .extract::<Config>()
        .map(Config::into_latest)
}

/// Render the JSON schema for the configuration.
pub fn config_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}
