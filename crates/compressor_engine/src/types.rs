use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type RequestId = u64;

/// Which compression endpoint an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Pdf,
    /// `quality` is sent as the `qualidade` form field.
    Image { quality: u8 },
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Pdf => "compress/pdf",
            Endpoint::Image { .. } => "compress/image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub request_id: RequestId,
    pub endpoint: Endpoint,
    /// Name sent as the multipart filename.
    pub file_name: String,
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOutput {
    pub bytes: Vec<u8>,
    pub suggested_filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        request_id: RequestId,
        result: Result<CompressOutput, CompressError>,
    },
    DownloadSaved {
        request_id: RequestId,
        result: Result<PathBuf, String>,
    },
    HealthChecked(Result<String, CompressError>),
}

/// A failed compression or health request. `message` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompressError {
    pub kind: FailureKind,
    pub message: String,
}

impl CompressError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The selected file could not be read from disk.
    ReadInput,
    /// The multipart body could not be assembled.
    InvalidRequest,
    /// The API answered with a non-success status.
    Server { status: u16 },
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The response was not what the API contract promises.
    InvalidResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ReadInput => write!(f, "input not readable"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Server { status } => write!(f, "server status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
