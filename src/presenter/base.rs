/// Renders the sign-in prompt for a blocked navigation.
///
/// Implementations offer sign-in and create-account actions that carry `target`
/// as the redirect destination. When the visitor closes the prompt without
/// signing in, the owner of the gate must call `AuthGate::dismiss`.
pub trait PromptPresenter: Send + Sync {
    fn show(&self, target: &str);
}

/// Performs the deferred navigation once a viewer has signed in.
pub trait Navigator {
    fn navigate(&self, route: &str);
}

/// A presenter for gates whose prompt is rendered elsewhere.
pub struct NoPresenter;

impl PromptPresenter for NoPresenter {
    fn show(&self, _target: &str) {}
}
