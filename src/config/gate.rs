use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which routes are gated and where the sign-in prompt points to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct GateConfig {
    /// Route patterns that require a session, e.g. "/gallery/:id".
    #[serde(default = "default_protected_routes")]
    pub protected_routes: Vec<String>,
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    /// Query parameter carrying the destination through the sign-in pages.
    #[serde(default = "default_redirect_param")]
    pub redirect_param: String,
    /// Upper bound on concurrently registered visitors.
    #[serde(default = "default_max_visitors")]
    pub max_visitors: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            protected_routes: default_protected_routes(),
            sign_in_path: default_sign_in_path(),
            register_path: default_register_path(),
            redirect_param: default_redirect_param(),
            max_visitors: default_max_visitors(),
        }
    }
}

fn default_protected_routes() -> Vec<String> {
    [
        "/gallery/:id",
        "/create-gallery",
        "/artist/:id",
        "/upload-artwork",
        "/settings",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_sign_in_path() -> String {
    "/login".to_string()
}

fn default_register_path() -> String {
    "/register".to_string()
}

fn default_redirect_param() -> String {
    "redirect".to_string()
}

fn default_max_visitors() -> usize {
    10_000
}
