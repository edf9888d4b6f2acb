use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use compressor_logging::{compressor_debug, compressor_warn, set_current_request};

use crate::persist::DownloadWriter;
use crate::upload::{ApiSettings, Compressor, ReqwestCompressor};
use crate::{CompressError, EngineEvent, FailureKind, RequestId, UploadRequest};

/// Receives engine events as they happen.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Upload(UploadRequest),
    Save {
        request_id: RequestId,
        filename: String,
        bytes: Vec<u8>,
    },
    CheckHealth,
}

/// Runs uploads, downloads and health checks on a background thread.
///
/// Commands are handled one at a time in submission order; every command
/// produces exactly one [`EngineEvent`] on the sink.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: ApiSettings,
        download_dir: PathBuf,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, CompressError> {
        let compressor: Arc<dyn Compressor> = Arc::new(ReqwestCompressor::new(settings)?);
        Self::with_compressor(compressor, DownloadWriter::new(download_dir), sink)
    }

    pub fn with_compressor(
        compressor: Arc<dyn Compressor>,
        writer: DownloadWriter,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, CompressError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| CompressError::new(FailureKind::Network, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let event =
                    runtime.block_on(handle_command(compressor.as_ref(), &writer, command));
                set_current_request(0);
                sink.emit(event);
            }
            compressor_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn upload(&self, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Upload(request));
    }

    pub fn save(&self, request_id: RequestId, filename: impl Into<String>, bytes: Vec<u8>) {
        let _ = self.cmd_tx.send(EngineCommand::Save {
            request_id,
            filename: filename.into(),
            bytes,
        });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }
}

async fn handle_command(
    compressor: &dyn Compressor,
    writer: &DownloadWriter,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Upload(request) => {
            set_current_request(request.request_id);
            let result = compressor.compress(&request).await;
            if let Err(err) = &result {
                compressor_warn!("upload failed ({}): {}", err.kind, err.message);
            }
            EngineEvent::UploadCompleted {
                request_id: request.request_id,
                result,
            }
        }
        EngineCommand::Save {
            request_id,
            filename,
            bytes,
        } => {
            set_current_request(request_id);
            let result = writer.save(&filename, &bytes).map_err(|err| {
                compressor_warn!("saving {} failed: {}", filename, err);
                err.to_string()
            });
            EngineEvent::DownloadSaved { request_id, result }
        }
        EngineCommand::CheckHealth => {
            let result = compressor.health().await;
            if let Err(err) = &result {
                compressor_warn!("health check failed: {}", err);
            }
            EngineEvent::HealthChecked(result)
        }
    }
}
