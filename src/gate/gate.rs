use std::sync::Arc;

use tracing::{debug, info};

use super::protected::ProtectedRoutes;
use super::state::{Decision, GateSnapshot, PromptState};
use crate::models::Viewer;
use crate::presenter::{Navigator, PromptPresenter};
use crate::session::SessionStore;

/// Decides, per protected-route render, whether to show the real content, the
/// sign-in prompt, or the fallback view, and remembers where the viewer was headed.
///
/// Invariant: `prompt` is `Visible` or `DismissedWithFallback` only while the
/// session is absent. Callers that share a gate between threads must hold one
/// lock across each method call (see `GateRegistry`).
pub struct AuthGate {
    session: Arc<dyn SessionStore>,
    presenter: Arc<dyn PromptPresenter>,
    prompt: PromptState,
    intent: Option<String>,
}

impl AuthGate {
    pub fn new(session: Arc<dyn SessionStore>, presenter: Arc<dyn PromptPresenter>) -> Self {
        AuthGate {
            session,
            presenter,
            prompt: PromptState::Hidden,
            intent: None,
        }
    }

    pub fn prompt_state(&self) -> PromptState {
        self.prompt
    }

    /// The destination remembered from the last denied entry.
    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn snapshot(&self) -> GateSnapshot {
        GateSnapshot {
            prompt: self.prompt,
            intent: self.intent.clone(),
            signed_in: self.session.has_session(),
        }
    }

    /// Evaluates a protected route.
    ///
    /// With a session this is always `ShowContent` and the intent is left alone.
    /// Without one, the first entry for a route opens the prompt, a dismissed
    /// prompt yields the fallback, and an open prompt suspends rendering. Entering
    /// a different route while gated starts over with the new route.
    pub fn enter(&mut self, route: &str, has_session: bool) -> Decision {
        if has_session {
            if self.prompt != PromptState::Hidden {
                debug!(route, "Session present, hiding prompt");
                self.prompt = PromptState::Hidden;
            }
            return Decision::ShowContent;
        }

        let same_route = self.intent.as_deref() == Some(route);
        match self.prompt {
            PromptState::Visible if same_route => Decision::Suspend,
            PromptState::DismissedWithFallback if same_route => Decision::ShowFallback,
            _ => {
                debug!(
                    route,
                    previous = ?self.intent,
                    "Protected route entered without session"
                );
                self.open_prompt(route.to_string());
                Decision::ShowPrompt(route.to_string())
            }
        }
    }

    /// Like `enter`, but for any route: routes outside `routes` render as-is and
    /// session presence is read from the session store.
    pub fn visit(&mut self, routes: &ProtectedRoutes, route: &str) -> Decision {
        if !routes.is_protected(route) {
            return Decision::ShowContent;
        }
        let has_session = self.session.has_session();
        self.enter(route, has_session)
    }

    /// Handles the presenter's "closed" notification.
    pub fn dismiss(&mut self) -> PromptState {
        if self.prompt == PromptState::Visible {
            debug!(intent = ?self.intent, "Prompt dismissed without signing in");
            self.prompt = PromptState::DismissedWithFallback;
        }
        self.prompt
    }

    /// Re-opens the prompt from the fallback view, keeping the intent.
    pub fn retry(&mut self) -> PromptState {
        if self.prompt == PromptState::DismissedWithFallback {
            self.prompt = PromptState::Visible;
            if let Some(target) = self.intent.as_deref() {
                debug!(route = target, "Prompt re-opened");
                self.presenter.show(target);
            }
        }
        self.prompt
    }

    /// Records the sign-in, hides the prompt and hands back the deferred
    /// destination. `None` means stay on the current route.
    pub fn on_sign_in_succeeded(&mut self, viewer: Viewer) -> Option<String> {
        info!(
            event_name = "gate.sign_in",
            viewer = %viewer.username,
            intent = ?self.intent,
            "Viewer signed in"
        );
        self.session.set_viewer(viewer);
        self.prompt = PromptState::Hidden;
        self.intent.take()
    }

    /// `on_sign_in_succeeded` followed by the redirect, if there is one.
    pub fn complete_sign_in(&mut self, viewer: Viewer, navigator: &dyn Navigator) -> Option<String> {
        let target = self.on_sign_in_succeeded(viewer);
        if let Some(route) = target.as_deref() {
            navigator.navigate(route);
        }
        target
    }

    pub fn sign_out(&mut self) {
        if let Some(viewer) = self.session.current_viewer() {
            info!(
                event_name = "gate.sign_out",
                viewer = %viewer.username,
                "Viewer signed out"
            );
        }
        self.session.clear_viewer();
        self.prompt = PromptState::Hidden;
        self.intent = None;
    }

    fn open_prompt(&mut self, route: String) {
        self.presenter.show(&route);
        self.intent = Some(route);
        self.prompt = PromptState::Visible;
    }
}
