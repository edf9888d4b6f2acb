use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};

use compressor_core::{ActionKind, CompressedPayload, Effect, Msg, RequestId};
use compressor_engine::{
    CompressError, Endpoint, EngineEvent, EngineHandle, EventSink, UploadRequest,
};
use compressor_logging::{compressor_info, compressor_warn};

use super::app::AppEvent;
use super::settings::Settings;

/// Remembers which action each in-flight request belongs to, since engine
/// events only carry the request id.
type RequestKinds = Arc<Mutex<HashMap<RequestId, ActionKind>>>;

pub struct EffectRunner {
    engine: EngineHandle,
    kinds: RequestKinds,
}

impl EffectRunner {
    pub fn new(settings: &Settings, tx: mpsc::Sender<AppEvent>) -> Result<Self, CompressError> {
        let kinds = RequestKinds::default();
        let sink = Arc::new(MsgSink {
            tx,
            kinds: kinds.clone(),
        });
        let engine = EngineHandle::new(
            settings.api_settings(),
            settings.download_dir.clone(),
            sink,
        )?;
        Ok(Self { engine, kinds })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Upload {
                    request_id,
                    kind,
                    file,
                    quality,
                } => {
                    compressor_info!(
                        "Upload request_id={} kind={} file={}",
                        request_id,
                        kind,
                        file.name
                    );
                    if let Ok(mut kinds) = self.kinds.lock() {
                        kinds.insert(request_id, kind);
                    }
                    let endpoint = match kind {
                        ActionKind::Pdf => Endpoint::Pdf,
                        ActionKind::Image => Endpoint::Image {
                            quality: quality.unwrap_or_default().value(),
                        },
                    };
                    self.engine.upload(UploadRequest {
                        request_id,
                        endpoint,
                        file_name: file.name,
                        file_path: file.path,
                    });
                }
                Effect::SaveDownload {
                    request_id,
                    kind,
                    filename,
                    bytes,
                } => {
                    compressor_info!(
                        "SaveDownload request_id={} kind={} filename={}",
                        request_id,
                        kind,
                        filename
                    );
                    self.engine.save(request_id, filename, bytes);
                }
                Effect::CheckHealth => self.engine.check_health(),
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
    kinds: RequestKinds,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match self.kinds.lock() {
            Ok(mut kinds) => engine_event_to_msg(event, &mut kinds),
            Err(_) => None,
        };
        match msg {
            Some(msg) => {
                let _ = self.tx.send(AppEvent::Msg(msg));
            }
            None => compressor_warn!("dropping engine event for an unknown request"),
        }
    }
}

/// Translates an engine event into a core message. The request's entry in
/// `kinds` is dropped once the request has settled.
fn engine_event_to_msg(
    event: EngineEvent,
    kinds: &mut HashMap<RequestId, ActionKind>,
) -> Option<Msg> {
    match event {
        EngineEvent::UploadCompleted { request_id, result } => {
            let kind = *kinds.get(&request_id)?;
            let result = match result {
                Ok(output) => Ok(CompressedPayload {
                    bytes: output.bytes,
                    suggested_filename: output.suggested_filename,
                }),
                Err(err) => {
                    kinds.remove(&request_id);
                    Err(err.message)
                }
            };
            Some(Msg::ResponseReceived {
                request_id,
                kind,
                result,
            })
        }
        EngineEvent::DownloadSaved { request_id, result } => {
            let kind = kinds.remove(&request_id)?;
            Some(Msg::DownloadSaved {
                request_id,
                kind,
                result,
            })
        }
        EngineEvent::HealthChecked(result) => {
            Some(Msg::HealthChecked(result.map_err(|err| err.message)))
        }
    }
}
