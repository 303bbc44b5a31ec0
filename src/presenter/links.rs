use serde::{Deserialize, Serialize};
use tracing::warn;
use url::form_urlencoded;

use crate::config::GateConfig;

/// The two actions offered by the sign-in prompt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PromptLinks {
    pub sign_in: String,
    pub create_account: String,
}

impl PromptLinks {
    /// Builds links that send the viewer back to `target` after signing in.
    pub fn for_target(target: &str, config: &GateConfig) -> Self {
        PromptLinks {
            sign_in: with_redirect(&config.sign_in_path, &config.redirect_param, target),
            create_account: with_redirect(&config.register_path, &config.redirect_param, target),
        }
    }
}

fn with_redirect(path: &str, param: &str, target: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(param, target)
        .finish();
    format!("{}?{}", path, query)
}

/// Reads the redirect parameter out of a query string, accepting only local paths.
///
/// `query` may start with `?`. Values that could leave the site (`//host`,
/// `https://...`, backslash variants) are rejected.
pub fn safe_redirect(query: &str, param: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let value = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())?;

    if is_local_path(&value) {
        Some(value)
    } else {
        warn!("Rejected non-local redirect target '{}'", value);
        None
    }
}

pub(crate) fn is_local_path(value: &str) -> bool {
    value.starts_with('/')
        && !value.starts_with("//")
        && !value.contains('\\')
        && !value.chars().any(char::is_control)
}
