use std::fmt;
use std::path::{Path, PathBuf};

use crate::view_model::{ActionView, AppViewModel};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Pdf,
    Image,
}

impl ActionKind {
    /// Extensions offered by the file picker for this action.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            ActionKind::Pdf => &["pdf"],
            ActionKind::Image => &["jpg", "jpeg", "png"],
        }
    }

    /// Input-level filter: does the picker offer a file with this name?
    pub fn accepts(self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((_, ext)) => self
                .accepted_extensions()
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    pub(crate) fn missing_file_message(self) -> &'static str {
        match self {
            ActionKind::Pdf => "Select a PDF file",
            ActionKind::Image => "Select an image (JPG or PNG)",
        }
    }

    pub(crate) fn progress_message(self) -> &'static str {
        match self {
            ActionKind::Pdf => "Compressing PDF...",
            ActionKind::Image => "Compressing image...",
        }
    }

    pub(crate) fn success_message(self) -> &'static str {
        match self {
            ActionKind::Pdf => "PDF compressed! The download has started.",
            ActionKind::Image => "Image compressed! The download has started.",
        }
    }

    pub(crate) fn fallback_error_message(self) -> &'static str {
        match self {
            ActionKind::Pdf => "Error compressing PDF.",
            ActionKind::Image => "Error compressing image.",
        }
    }

    pub(crate) fn button_label(self) -> &'static str {
        match self {
            ActionKind::Pdf => "Compress PDF",
            ActionKind::Image => "Compress Image",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Pdf => write!(f, "pdf"),
            ActionKind::Image => write!(f, "image"),
        }
    }
}

/// A file chosen by the user. `name` is what gets uploaded and what fallback
/// download names derive from; `path` is where the engine reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Uses the final path component as the display/upload name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Some(Self::new(name, path))
    }
}

/// JPEG quality sent with image uploads, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;
    pub const DEFAULT: Quality = Quality(40);

    /// Slider semantics: out-of-range input snaps to the nearest bound.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingRequest {
    id: RequestId,
    file: SelectedFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ActionSlot {
    selected: Option<SelectedFile>,
    pending: Option<PendingRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pdf: ActionSlot,
    image: ActionSlot,
    quality: Quality,
    status: Option<Status>,
    api_health: Option<Result<String, String>>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pdf: ActionSlot::default(),
            image: ActionSlot::default(),
            quality: Quality::DEFAULT,
            status: None,
            api_health: None,
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quality(quality: Quality) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.busy();
        AppViewModel {
            pdf: self.action_view(ActionKind::Pdf),
            image: self.action_view(ActionKind::Image),
            quality: self.quality,
            status: self.status.clone(),
            busy,
            inputs_enabled: !busy,
            api_health: self.api_health.clone(),
            dirty: self.dirty,
        }
    }

    fn action_view(&self, kind: ActionKind) -> ActionView {
        let busy = self.busy();
        let selected_name = self.selected(kind).map(|file| file.name.clone());
        ActionView {
            can_submit: selected_name.is_some() && !busy,
            selected_name,
            button_label: if busy {
                "Compressing…".to_string()
            } else {
                kind.button_label().to_string()
            },
        }
    }

    /// Returns whether the view changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn busy(&self) -> bool {
        self.pdf.pending.is_some() || self.image.pending.is_some()
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn selected(&self, kind: ActionKind) -> Option<&SelectedFile> {
        self.slot(kind).selected.as_ref()
    }

    fn slot(&self, kind: ActionKind) -> &ActionSlot {
        match kind {
            ActionKind::Pdf => &self.pdf,
            ActionKind::Image => &self.image,
        }
    }

    fn slot_mut(&mut self, kind: ActionKind) -> &mut ActionSlot {
        match kind {
            ActionKind::Pdf => &mut self.pdf,
            ActionKind::Image => &mut self.image,
        }
    }

    pub(crate) fn select_file(&mut self, kind: ActionKind, file: Option<SelectedFile>) {
        self.slot_mut(kind).selected = file;
        self.status = None;
        self.dirty = true;
    }

    pub(crate) fn set_quality(&mut self, quality: Quality) {
        if self.quality != quality {
            self.quality = quality;
            self.dirty = true;
        }
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = Some(status);
        self.dirty = true;
    }

    pub(crate) fn set_api_health(&mut self, health: Result<String, String>) {
        self.api_health = Some(health);
        self.dirty = true;
    }

    /// Marks `kind` as in flight for `file` and returns the new request id.
    pub(crate) fn begin_request(&mut self, kind: ActionKind, file: SelectedFile) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.slot_mut(kind).pending = Some(PendingRequest { id, file });
        self.set_status(Status::info(kind.progress_message()));
        id
    }

    /// The file submitted by the in-flight request `id`, if it is still current.
    pub(crate) fn pending_file(&self, kind: ActionKind, id: RequestId) -> Option<&SelectedFile> {
        self.slot(kind)
            .pending
            .as_ref()
            .filter(|pending| pending.id == id)
            .map(|pending| &pending.file)
    }

    /// Settles the in-flight request successfully: the selection is cleared.
    pub(crate) fn complete_request(&mut self, kind: ActionKind) {
        let slot = self.slot_mut(kind);
        slot.pending = None;
        slot.selected = None;
        self.set_status(Status::success(kind.success_message()));
    }

    /// Settles the in-flight request with an error; the selection is kept for a retry.
    pub(crate) fn fail_request(&mut self, kind: ActionKind, message: String) {
        self.slot_mut(kind).pending = None;
        let message = if message.trim().is_empty() {
            kind.fallback_error_message().to_string()
        } else {
            message
        };
        self.set_status(Status::error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_slider_bounds() {
        assert_eq!(Quality::clamped(0).value(), 1);
        assert_eq!(Quality::clamped(-20).value(), 1);
        assert_eq!(Quality::clamped(250).value(), 100);
        assert_eq!(Quality::clamped(85).value(), 85);
        assert_eq!(Quality::default().value(), 40);
    }

    #[test]
    fn quality_displays_as_plain_decimal() {
        assert_eq!(Quality::clamped(7).to_string(), "7");
        assert_eq!(Quality::clamped(100).to_string(), "100");
    }

    #[test]
    fn picker_filters_by_extension() {
        assert!(ActionKind::Pdf.accepts("report.pdf"));
        assert!(ActionKind::Pdf.accepts("REPORT.PDF"));
        assert!(!ActionKind::Pdf.accepts("photo.png"));
        assert!(!ActionKind::Pdf.accepts("pdf"));
        assert!(ActionKind::Image.accepts("a.b.jpg"));
        assert!(ActionKind::Image.accepts("photo.JPEG"));
        assert!(ActionKind::Image.accepts("photo.png"));
        assert!(!ActionKind::Image.accepts("photo.gif"));
    }

    #[test]
    fn selected_file_uses_final_path_component() {
        let file = SelectedFile::from_path(Path::new("/tmp/in/doc.pdf")).unwrap();
        assert_eq!(file.name, "doc.pdf");
        assert_eq!(file.path, PathBuf::from("/tmp/in/doc.pdf"));
        assert!(SelectedFile::from_path(Path::new("/")).is_none());
    }

    #[test]
    fn empty_failure_message_uses_fallback() {
        let mut state = AppState::new();
        let file = SelectedFile::new("doc.pdf", "doc.pdf");
        state.select_file(ActionKind::Pdf, Some(file.clone()));
        state.begin_request(ActionKind::Pdf, file);
        state.fail_request(ActionKind::Pdf, "  ".to_string());
        assert_eq!(
            state.status(),
            Some(&Status::error("Error compressing PDF."))
        );
        assert!(!state.busy());
    }
}
