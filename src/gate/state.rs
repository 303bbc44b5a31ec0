use serde::{Deserialize, Serialize};

/// Whether the sign-in prompt is on screen, and what replaces protected content.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PromptState {
    #[default]
    Hidden,
    Visible,
    /// The prompt was closed without signing in; protected content shows a
    /// "go back / sign in" fallback instead.
    DismissedWithFallback,
}

/// What a protected route should render.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "decision", content = "route", rename_all = "snake_case")]
pub enum Decision {
    ShowContent,
    /// The prompt was just opened for this route.
    ShowPrompt(String),
    ShowFallback,
    /// The prompt is open; render nothing underneath it.
    Suspend,
}

impl Decision {
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::ShowContent => "show_content",
            Decision::ShowPrompt(_) => "show_prompt",
            Decision::ShowFallback => "show_fallback",
            Decision::Suspend => "suspend",
        }
    }

    pub fn prompt_target(&self) -> Option<&str> {
        match self {
            Decision::ShowPrompt(route) => Some(route),
            _ => None,
        }
    }
}

/// A point-in-time view of a gate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GateSnapshot {
    pub prompt: PromptState,
    pub intent: Option<String>,
    pub signed_in: bool,
}
