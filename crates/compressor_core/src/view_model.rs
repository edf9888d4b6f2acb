use crate::{Quality, Status};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionView {
    pub selected_name: Option<String>,
    /// Button enabled: a file is selected and nothing is in flight.
    pub can_submit: bool,
    pub button_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub pdf: ActionView,
    pub image: ActionView,
    pub quality: Quality,
    pub status: Option<Status>,
    pub busy: bool,
    /// File pickers and the quality slider accept input.
    pub inputs_enabled: bool,
    /// Last health check: `Ok(message)` from the API or `Err(reason)`.
    pub api_health: Option<Result<String, String>>,
    pub dirty: bool,
}
