//! Errors surfaced to API clients.
use derive_more::Display;

/// The failures the API reports, with the exact wording clients see.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum HTTPError {
    /// A document filter named an `_id` that does not parse as an identifier.
    #[display(fmt = "Invalid _id format")]
    InvalidId,
    /// Catch-all for failures the client can do nothing about.
    #[display(fmt = "Internal server error")]
    InternalServerError,
}
