use std::path::PathBuf;

use crate::{ActionKind, Quality, RequestId, SelectedFile};

/// Successful response body of a compression request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPayload {
    pub bytes: Vec<u8>,
    /// Filename taken from the `Content-Disposition` header, if the server sent one.
    pub suggested_filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file for `kind`; `None` means the picker was cancelled.
    FileSelected {
        kind: ActionKind,
        file: Option<SelectedFile>,
    },
    /// User moved the JPEG quality slider.
    QualityChanged(Quality),
    /// User clicked "Compress PDF" or "Compress Image".
    CompressClicked(ActionKind),
    /// Engine finished the upload. `Err` carries the failure message, possibly empty.
    ResponseReceived {
        request_id: RequestId,
        kind: ActionKind,
        result: Result<CompressedPayload, String>,
    },
    /// Engine finished writing the download.
    DownloadSaved {
        request_id: RequestId,
        kind: ActionKind,
        result: Result<PathBuf, String>,
    },
    /// User asked whether the API is reachable.
    HealthCheckRequested,
    /// Engine finished the health check.
    HealthChecked(Result<String, String>),
    /// Input that changes nothing (e.g. an empty command line).
    NoOp,
}
