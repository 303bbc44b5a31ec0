use tracing::info;

use super::{PromptLinks, PromptPresenter};
use crate::config::GateConfig;

/// A headless presenter: remote front ends render the prompt themselves from the
/// links returned by the HTTP API, so showing it here only records the event.
pub struct TracingPresenter {
    config: GateConfig,
}

impl TracingPresenter {
    pub fn new(config: &GateConfig) -> Self {
        TracingPresenter {
            config: config.clone(),
        }
    }
}

impl PromptPresenter for TracingPresenter {
    fn show(&self, target: &str) {
        let links = PromptLinks::for_target(target, &self.config);
        info!(
            event_name = "gate.prompt.shown",
            route = target,
            sign_in = %links.sign_in,
            create_account = %links.create_account,
            "Showing sign-in prompt"
        );
    }
}
