//! Compressor engine: talks to the Compression API and delivers downloads.
mod engine;
mod filename;
mod persist;
mod types;
mod upload;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use filename::{filename_from_content_disposition, sanitize_download_name};
pub use persist::{ensure_download_dir, DownloadWriter, PersistError};
pub use types::{
    CompressError, CompressOutput, Endpoint, EngineEvent, FailureKind, RequestId, UploadRequest,
};
pub use upload::{server_error_message, ApiSettings, Compressor, ReqwestCompressor};
