use std::path::PathBuf;
use std::sync::Once;

use compressor_core::{
    update, ActionKind, AppState, CompressedPayload, Effect, Msg, Quality, RequestId,
    SelectedFile, Status, StatusKind,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(compressor_logging::initialize_for_tests);
}

fn select(state: AppState, kind: ActionKind, name: &str) -> AppState {
    let file = SelectedFile::new(name, format!("/tmp/in/{name}"));
    let (state, effects) = update(
        state,
        Msg::FileSelected {
            kind,
            file: Some(file),
        },
    );
    assert!(effects.is_empty());
    state
}

fn click(state: AppState, kind: ActionKind) -> (AppState, Vec<Effect>) {
    update(state, Msg::CompressClicked(kind))
}

fn upload_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Upload { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("upload effect")
}

fn respond_ok(
    state: AppState,
    kind: ActionKind,
    request_id: RequestId,
    suggested: Option<&str>,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::ResponseReceived {
            request_id,
            kind,
            result: Ok(CompressedPayload {
                bytes: b"compressed".to_vec(),
                suggested_filename: suggested.map(str::to_string),
            }),
        },
    )
}

fn saved(state: AppState, kind: ActionKind, request_id: RequestId) -> AppState {
    let (state, effects) = update(
        state,
        Msg::DownloadSaved {
            request_id,
            kind,
            result: Ok(PathBuf::from("/tmp/out/whatever")),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn compress_without_selection_is_rejected_locally() {
    init_logging();
    for (kind, message) in [
        (ActionKind::Pdf, "Select a PDF file"),
        (ActionKind::Image, "Select an image (JPG or PNG)"),
    ] {
        let (state, effects) = click(AppState::new(), kind);
        assert!(effects.is_empty());
        assert_eq!(state.status(), Some(&Status::error(message)));
        assert!(!state.busy());
    }
}

#[test]
fn compress_pdf_uploads_and_becomes_busy() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Pdf, "report.pdf");
    let (state, effects) = click(state, ActionKind::Pdf);

    assert_eq!(
        effects,
        vec![Effect::Upload {
            request_id: 1,
            kind: ActionKind::Pdf,
            file: SelectedFile::new("report.pdf", "/tmp/in/report.pdf"),
            quality: None,
        }]
    );
    let view = state.view();
    assert!(view.busy);
    assert!(!view.inputs_enabled);
    assert!(!view.pdf.can_submit);
    assert!(!view.image.can_submit);
    assert_eq!(view.pdf.button_label, "Compressing…");
    assert_eq!(view.status, Some(Status::info("Compressing PDF...")));
}

#[test]
fn image_upload_carries_quality_at_click_time() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Image, "img.jpg");
    let (state, _) = update(state, Msg::QualityChanged(Quality::clamped(7)));
    let (_state, effects) = click(state, ActionKind::Image);

    match &effects[..] {
        [Effect::Upload { quality, kind, .. }] => {
            assert_eq!(*kind, ActionKind::Image);
            assert_eq!(quality.map(|q| q.to_string()), Some("7".to_string()));
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn header_filename_wins_over_original_name() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Pdf, "something_else.pdf");
    let (state, effects) = click(state, ActionKind::Pdf);
    let id = upload_id(&effects);

    let (state, effects) = respond_ok(state, ActionKind::Pdf, id, Some("out.pdf"));
    assert_eq!(
        effects,
        vec![Effect::SaveDownload {
            request_id: id,
            kind: ActionKind::Pdf,
            filename: "out.pdf".to_string(),
            bytes: b"compressed".to_vec(),
        }]
    );
    // Still busy until the download lands.
    assert!(state.busy());
}

#[test]
fn pdf_fallback_filename() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Pdf, "report.pdf");
    let (state, effects) = click(state, ActionKind::Pdf);
    let id = upload_id(&effects);

    let (_state, effects) = respond_ok(state, ActionKind::Pdf, id, None);
    assert!(matches!(
        &effects[..],
        [Effect::SaveDownload { filename, .. }] if filename == "report_comprimido.pdf"
    ));
}

#[test]
fn successful_image_flow_clears_selection() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Image, "img.jpg");
    let (state, _) = update(state, Msg::QualityChanged(Quality::clamped(85)));
    let (state, effects) = click(state, ActionKind::Image);
    let id = upload_id(&effects);

    let (state, effects) = respond_ok(state, ActionKind::Image, id, None);
    assert!(matches!(
        &effects[..],
        [Effect::SaveDownload { filename, .. }] if filename == "img_comprimido.jpg"
    ));

    let mut state = saved(state, ActionKind::Image, id);
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.image.selected_name, None);
    assert_eq!(
        view.status.as_ref().map(|s| s.kind),
        Some(StatusKind::Success)
    );
    assert_eq!(view.quality.value(), 85);
    assert!(state.consume_dirty());
}

#[test]
fn server_error_keeps_selection_for_retry() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Pdf, "doc.pdf");
    let (state, effects) = click(state, ActionKind::Pdf);
    let id = upload_id(&effects);

    let (state, effects) = update(
        state,
        Msg::ResponseReceived {
            request_id: id,
            kind: ActionKind::Pdf,
            result: Err("scan failed".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.busy());
    assert_eq!(state.status(), Some(&Status::error("scan failed")));
    assert_eq!(state.view().pdf.selected_name.as_deref(), Some("doc.pdf"));
    assert!(state.view().pdf.can_submit);

    // Retrying issues a fresh request.
    let (_state, effects) = click(state, ActionKind::Pdf);
    assert_eq!(upload_id(&effects), id + 1);
}

#[test]
fn failed_download_keeps_selection() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Image, "photo.png");
    let (state, effects) = click(state, ActionKind::Image);
    let id = upload_id(&effects);
    let (state, _) = respond_ok(state, ActionKind::Image, id, None);

    let (state, _) = update(
        state,
        Msg::DownloadSaved {
            request_id: id,
            kind: ActionKind::Image,
            result: Err(String::new()),
        },
    );
    assert!(!state.busy());
    assert_eq!(
        state.status(),
        Some(&Status::error("Error compressing image."))
    );
    assert_eq!(state.view().image.selected_name.as_deref(), Some("photo.png"));
}

#[test]
fn overlapping_actions_are_disallowed() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Pdf, "doc.pdf");
    let state = select(state, ActionKind::Image, "img.jpg");
    let (state, effects) = click(state, ActionKind::Pdf);
    assert_eq!(effects.len(), 1);

    let (state, effects) = click(state, ActionKind::Image);
    assert!(effects.is_empty());
    let (state, effects) = click(state, ActionKind::Pdf);
    assert!(effects.is_empty());
    assert_eq!(state.status(), Some(&Status::info("Compressing PDF...")));
}

#[test]
fn inputs_are_locked_while_busy() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Pdf, "doc.pdf");
    let (state, _) = click(state, ActionKind::Pdf);

    let state = select(state, ActionKind::Pdf, "other.pdf");
    let (state, _) = update(state, Msg::QualityChanged(Quality::clamped(90)));
    let view = state.view();
    assert_eq!(view.pdf.selected_name.as_deref(), Some("doc.pdf"));
    assert_eq!(view.quality, Quality::DEFAULT);
}

#[test]
fn stale_responses_are_ignored() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Pdf, "doc.pdf");
    let (state, effects) = click(state, ActionKind::Pdf);
    let id = upload_id(&effects);

    let before = state.clone();
    let (state, effects) = respond_ok(state, ActionKind::Pdf, id + 10, None);
    assert!(effects.is_empty());
    assert_eq!(state, before);

    // A response routed to the wrong action is stale too.
    let (state, effects) = respond_ok(state, ActionKind::Image, id, None);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn selecting_a_file_clears_status() {
    init_logging();
    let (state, _) = click(AppState::new(), ActionKind::Pdf);
    assert!(state.status().is_some());

    let state = select(state, ActionKind::Pdf, "doc.pdf");
    assert_eq!(state.status(), None);

    let (state, _) = click(AppState::new(), ActionKind::Image);
    let (state, _) = update(
        state,
        Msg::FileSelected {
            kind: ActionKind::Image,
            file: None,
        },
    );
    assert_eq!(state.status(), None);
    assert_eq!(state.selected(ActionKind::Image), None);
}

#[test]
fn selections_are_independent() {
    init_logging();
    let state = select(AppState::new(), ActionKind::Pdf, "doc.pdf");
    let state = select(state, ActionKind::Image, "img.png");
    let (state, effects) = click(state, ActionKind::Pdf);
    let id = upload_id(&effects);
    let (state, _) = respond_ok(state, ActionKind::Pdf, id, None);
    let state = saved(state, ActionKind::Pdf, id);

    let view = state.view();
    assert_eq!(view.pdf.selected_name, None);
    assert_eq!(view.image.selected_name.as_deref(), Some("img.png"));
    assert!(view.image.can_submit);
    assert_eq!(view.image.button_label, "Compress Image");
}

#[test]
fn health_check_round_trip() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::HealthCheckRequested);
    assert_eq!(effects, vec![Effect::CheckHealth]);
    assert!(state.view().api_health.is_none());

    let (state, effects) = update(state, Msg::HealthChecked(Ok("running".to_string())));
    assert!(effects.is_empty());
    assert_eq!(state.view().api_health, Some(Ok("running".to_string())));
    assert_eq!(state.status(), None);
    assert!(!state.busy());
}
