//! Library exports for galleryguard, shared between the binary and tests.

pub mod config;
pub mod gate;
pub mod models;
pub mod presenter;
pub mod registry;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
