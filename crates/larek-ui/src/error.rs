//! Presentation-layer error types.

use larek_commerce::CommerceError;
use larek_data::FetchError;
use thiserror::Error;

/// Errors raised while wiring or driving the storefront views.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The API was used out of order: clicking a disabled button, rendering
    /// a dialog with the wrong content, closing when nothing is open, or
    /// emitting an event nobody subscribed to.
    #[error("Invalid use: {0}")]
    InvalidUse(String),

    /// A domain rule was violated.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// A network call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl UiError {
    pub(crate) fn invalid_use(message: impl Into<String>) -> Self {
        UiError::InvalidUse(message.into())
    }
}
