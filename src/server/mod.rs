//! Functionality for serving the greeting-card API.

pub mod api;
pub mod app;
pub mod errors;
pub mod tracing;
