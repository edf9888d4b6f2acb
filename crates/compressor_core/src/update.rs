use crate::{fallback_download_name, ActionKind, AppState, Effect, Msg, Status};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected { kind, file } => {
            // Pickers are disabled while a request is in flight.
            if !state.busy() {
                state.select_file(kind, file);
            }
            Vec::new()
        }
        Msg::QualityChanged(quality) => {
            if !state.busy() {
                state.set_quality(quality);
            }
            Vec::new()
        }
        Msg::CompressClicked(kind) => compress_clicked(&mut state, kind),
        Msg::ResponseReceived {
            request_id,
            kind,
            result,
        } => {
            let Some(original) = state
                .pending_file(kind, request_id)
                .map(|file| file.name.clone())
            else {
                return (state, Vec::new());
            };
            match result {
                Ok(payload) => {
                    let filename = payload
                        .suggested_filename
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| fallback_download_name(kind, &original));
                    vec![Effect::SaveDownload {
                        request_id,
                        kind,
                        filename,
                        bytes: payload.bytes,
                    }]
                }
                Err(message) => {
                    state.fail_request(kind, message);
                    Vec::new()
                }
            }
        }
        Msg::DownloadSaved {
            request_id,
            kind,
            result,
        } => {
            if state.pending_file(kind, request_id).is_none() {
                return (state, Vec::new());
            }
            match result {
                Ok(_) => state.complete_request(kind),
                Err(message) => state.fail_request(kind, message),
            }
            Vec::new()
        }
        Msg::HealthCheckRequested => vec![Effect::CheckHealth],
        Msg::HealthChecked(result) => {
            state.set_api_health(result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn compress_clicked(state: &mut AppState, kind: ActionKind) -> Vec<Effect> {
    // Both buttons are disabled while either action is in flight, so the
    // shared status can never be raced by overlapping requests.
    if state.busy() {
        return Vec::new();
    }
    let Some(file) = state.selected(kind).cloned() else {
        state.set_status(Status::error(kind.missing_file_message()));
        return Vec::new();
    };
    let quality = match kind {
        ActionKind::Pdf => None,
        ActionKind::Image => Some(state.quality()),
    };
    let request_id = state.begin_request(kind, file.clone());
    vec![Effect::Upload {
        request_id,
        kind,
        file,
        quality,
    }]
}
