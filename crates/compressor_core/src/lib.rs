//! Compressor core: pure upload/compress/download state machine and view-model helpers.
mod effect;
mod filename;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filename::{fallback_download_name, COMPRESSED_SUFFIX};
pub use msg::{CompressedPayload, Msg};
pub use state::{ActionKind, AppState, Quality, RequestId, SelectedFile, Status, StatusKind};
pub use update::update;
pub use view_model::{ActionView, AppViewModel};
