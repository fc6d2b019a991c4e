//! This module contains the API endpoints for the server.
pub mod documents;
pub mod routes;
pub mod state;
