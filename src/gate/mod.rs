pub mod gate;
pub mod protected;
pub mod state;

pub use gate::AuthGate;
pub use protected::{route_path, ProtectedRoutes, RoutePattern};
pub use state::{Decision, GateSnapshot, PromptState};
