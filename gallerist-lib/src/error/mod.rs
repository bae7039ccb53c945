//! Error types

mod api;

pub use api::*;

/// Top-level error type for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the catalog API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}
