pub mod base;
pub mod memory_store;

// Re-export the primary session items so code outside can do
// "use crate::session::{SessionStore, create_session_store};"
pub use base::{create_session_store, SessionStore};
pub use memory_store::MemorySessionStore;
