use crate::{ActionKind, Quality, RequestId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the selected file to the compression endpoint for `kind`.
    /// `quality` is only set for image uploads.
    Upload {
        request_id: RequestId,
        kind: ActionKind,
        file: SelectedFile,
        quality: Option<Quality>,
    },
    /// Store the compressed payload under `filename` in the download directory.
    SaveDownload {
        request_id: RequestId,
        kind: ActionKind,
        filename: String,
        bytes: Vec<u8>,
    },
    CheckHealth,
}
