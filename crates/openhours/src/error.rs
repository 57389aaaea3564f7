//! Error types for opening-hours parsing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpenHoursError {
    /// The layout produced an odd number of boundaries: some interval was
    /// opened but never closed. Carries the layout as given by the caller.
    #[error("Invalid layout: {0:?}")]
    InvalidLayout(String),
}

/// Convenience alias used throughout openhours.
pub type Result<T> = std::result::Result<T, OpenHoursError>;
