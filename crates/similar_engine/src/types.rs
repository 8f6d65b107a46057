use std::fmt;

use serde::Serialize;

/// Body of `POST /similar/feedback`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSubmission {
    pub source_file_name: String,
    pub candidate_file_name: String,
    pub label: f64,
}

/// Body of `POST /feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionSubmission {
    pub source_file_name: String,
    pub candidate_file_name: String,
    pub label: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Data of one push event, in arrival order.
    StreamPayload(String),
    /// The push connection could not be opened or broke.
    StreamFailed(StreamError),
    RatingSubmitted {
        submission: RatingSubmission,
        result: Result<(), SubmitError>,
    },
    ReactionSubmitted {
        submission: ReactionSubmission,
        result: Result<(), SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamError {
    pub kind: FailureKind,
    pub message: String,
}

impl StreamError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidBody,
    HttpStatus(u16),
    Timeout,
    /// The server closed the push stream.
    Disconnected,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidBody => write!(f, "invalid request body"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Disconnected => write!(f, "disconnected"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

pub(crate) fn map_reqwest_error(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        return FailureKind::Timeout;
    }
    if err.is_builder() {
        return FailureKind::InvalidUrl;
    }
    FailureKind::Network
}
