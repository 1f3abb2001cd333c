use std::fmt;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AnswerCompleted {
        request_id: RequestId,
        result: Result<String, AskError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AskError {
    pub kind: FailureKind,
    pub message: String,
}

impl AskError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Coarse failure classes reported to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Configuration,
    Transport,
    Protocol,
    Payload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingBaseUrl,
    InvalidBaseUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedBody,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The engine itself could not run the request (client or runtime setup).
    Internal,
}

impl FailureKind {
    pub fn category(&self) -> FailureCategory {
        match self {
            FailureKind::MissingBaseUrl | FailureKind::InvalidBaseUrl => {
                FailureCategory::Configuration
            }
            FailureKind::Network | FailureKind::Timeout | FailureKind::Internal => {
                FailureCategory::Transport
            }
            FailureKind::HttpStatus(_) => FailureCategory::Protocol,
            FailureKind::MalformedBody | FailureKind::TooLarge { .. } => FailureCategory::Payload,
        }
    }

    /// Status code of a rejected reply, if that is what this failure is.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            FailureKind::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingBaseUrl => write!(f, "missing base url"),
            FailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Internal => write!(f, "internal engine error"),
        }
    }
}
