use std::fmt;

pub type SubmissionId = u64;
pub type ToastId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        submission: SubmissionId,
        result: Result<UploadOutput, UploadError>,
    },
    ProbeCompleted {
        result: Result<String, UploadError>,
    },
    ToastExpired {
        toast_id: ToastId,
    },
}

/// A response the success policy accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutput {
    pub status: u16,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Network,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    HttpStatus(u16),
}

impl FailureKind {
    /// Transport-level failures, as opposed to a body that could not be used.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FailureKind::InvalidEndpoint
                | FailureKind::Network
                | FailureKind::Timeout
                | FailureKind::TooLarge { .. }
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "invalid json body"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
        }
    }
}
