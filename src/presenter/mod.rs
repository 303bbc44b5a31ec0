pub mod base;
pub mod links;
pub mod tracing_presenter;

pub use base::{Navigator, NoPresenter, PromptPresenter};
pub use links::{safe_redirect, PromptLinks};
pub use tracing_presenter::TracingPresenter;
