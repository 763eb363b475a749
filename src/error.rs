//! Error taxonomy for the client core.
//!
//! ERROR HANDLING
//! ==============
//! Backend failures are values, never panics. The sync engine logs and reports
//! them without blocking session publication; callers of the validation helpers
//! receive them through `?`.

/// Failure talking to the remote document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response (offline, DNS, CORS, aborted).
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    /// A create-only write found an existing document.
    #[error("document already exists: {0}")]
    Conflict(String),
    /// The backend answered with a non-success status.
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The response body could not be decoded.
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

/// A stored or requested theme name outside the known palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid theme: {0}")]
    Invalid(String),
}

/// Top-level error for session, theme and validation operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The auth feed is closed or the provider could not be reached.
    #[error("auth provider unavailable: {0}")]
    AuthUnavailable(String),
    /// The operation needs a signed-in user and there is none.
    #[error("no active session")]
    NoSession,
    /// The sync engine has shut down and accepts no more input.
    #[error("sync engine stopped")]
    EngineStopped,
    /// Local persistent storage refused a write.
    #[error("local storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// Invalid or missing configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
