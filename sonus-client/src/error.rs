//! Error types for device access.

use thiserror::Error;

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;

/// Coarse classification of a [`FetchError`], stable enough to log and match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Setup,
    Transport,
    NotReady,
    Redirect,
    ClientError,
    ServerError,
    UnexpectedStatus,
    Malformed,
    DeadlineExceeded,
}

/// Errors returned by a single fetch against the device API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),

    /// Connection, TLS or body read failure.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The device kept answering "no content" until the retry budget ran out.
    #[error("Device not ready at {url} after {attempts} attempts")]
    NotReady { url: String, attempts: u32 },

    #[error("Redirect received from device: {status}")]
    Redirect { url: String, status: String },

    /// 4xx response; the message is taken from the error payload.
    #[error("{message}")]
    ClientError {
        url: String,
        status: u16,
        message: String,
    },

    /// 5xx response; the message is taken from the error payload.
    #[error("{message}")]
    ServerError {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Invalid response received: {status}")]
    UnexpectedStatus { url: String, status: String },

    /// A success response whose body did not match the expected record.
    #[error("Failed to decode response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("Deadline exceeded while calling {url}")]
    DeadlineExceeded { url: String },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Setup(_) => FetchErrorKind::Setup,
            FetchError::Transport { .. } => FetchErrorKind::Transport,
            FetchError::NotReady { .. } => FetchErrorKind::NotReady,
            FetchError::Redirect { .. } => FetchErrorKind::Redirect,
            FetchError::ClientError { .. } => FetchErrorKind::ClientError,
            FetchError::ServerError { .. } => FetchErrorKind::ServerError,
            FetchError::UnexpectedStatus { .. } => FetchErrorKind::UnexpectedStatus,
            FetchError::Malformed { .. } => FetchErrorKind::Malformed,
            FetchError::DeadlineExceeded { .. } => FetchErrorKind::DeadlineExceeded,
        }
    }

    /// URL of the failed call, when one was made.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Setup(_) => None,
            FetchError::Transport { url, .. }
            | FetchError::NotReady { url, .. }
            | FetchError::Redirect { url, .. }
            | FetchError::ClientError { url, .. }
            | FetchError::ServerError { url, .. }
            | FetchError::UnexpectedStatus { url, .. }
            | FetchError::Malformed { url, .. }
            | FetchError::DeadlineExceeded { url } => Some(url),
        }
    }
}

/// Errors establishing a [`DeviceSession`](crate::DeviceSession).
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to set up client for {device}: {source}")]
    Setup {
        device: String,
        #[source]
        source: FetchError,
    },

    /// The system name could not be read.
    #[error("Failed to discover identity of {device}: {source}")]
    Identity {
        device: String,
        #[source]
        source: FetchError,
    },

    /// The address context list could not be read.
    #[error("Failed to discover topology of {device}: {source}")]
    Topology {
        device: String,
        #[source]
        source: FetchError,
    },
}

impl SessionError {
    /// The fetch failure underneath this error.
    pub fn fetch_error(&self) -> &FetchError {
        match self {
            SessionError::Setup { source, .. }
            | SessionError::Identity { source, .. }
            | SessionError::Topology { source, .. } => source,
        }
    }
}
