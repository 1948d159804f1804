/// Error types for the findash dashboards
use thiserror::Error;

/// The two failure kinds a dashboard handler can hit.
///
/// Both are recovered at the binder boundary and shown to the user as an
/// inline notice; neither is ever propagated to the UI runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashError {
    /// Source file missing or unreadable, malformed rows, empty API
    /// response, or a network failure.
    #[error("{0}")]
    DataUnavailable(String),

    /// Start year after end year, the same indicator on both axes, or an
    /// empty instrument selection.
    #[error("{0}")]
    InvalidSelection(String),
}

impl DashError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        DashError::DataUnavailable(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        DashError::InvalidSelection(msg.into())
    }

    pub fn is_invalid_selection(&self) -> bool {
        matches!(self, DashError::InvalidSelection(_))
    }
}

impl From<csv::Error> for DashError {
    fn from(e: csv::Error) -> Self {
        DashError::DataUnavailable(format!("Failed to parse CSV: {e}"))
    }
}

impl From<std::io::Error> for DashError {
    fn from(e: std::io::Error) -> Self {
        DashError::DataUnavailable(format!("Failed to read data: {e}"))
    }
}

impl From<serde_json::Error> for DashError {
    fn from(e: serde_json::Error) -> Self {
        DashError::DataUnavailable(format!("Failed to parse response: {e}"))
    }
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for DashError {
    fn from(e: reqwest::Error) -> Self {
        DashError::DataUnavailable(format!("HTTP request failed: {e}"))
    }
}

/// Type alias for Results using DashError
pub type Result<T> = std::result::Result<T, DashError>;
