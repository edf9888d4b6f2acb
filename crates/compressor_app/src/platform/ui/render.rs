use compressor_core::{ActionView, AppViewModel, Status, StatusKind};

/// Renders the form as text lines, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);

    lines.push(format!("API: {}", health_label(view)));
    lines.push(format!("PDF    {}", action_line(&view.pdf)));
    lines.push(format!(
        "Image  {} | JPEG quality {} (1-100)",
        action_line(&view.image),
        view.quality
    ));
    if !view.inputs_enabled {
        lines.push("       inputs locked until the current request finishes".to_string());
    }
    if let Some(status) = &view.status {
        lines.push(status_line(status));
    }

    lines
}

pub fn status_line(status: &Status) -> String {
    let tag = match status.kind {
        StatusKind::Info => "..",
        StatusKind::Success => "OK",
        StatusKind::Error => "!!",
    };
    format!("[{tag}] {}", status.message)
}

fn action_line(action: &ActionView) -> String {
    let file = action.selected_name.as_deref().unwrap_or("(no file selected)");
    let state = if action.can_submit { "ready" } else { "disabled" };
    format!("{file} | [{}] {state}", action.button_label)
}

fn health_label(view: &AppViewModel) -> String {
    match &view.api_health {
        None => "not checked".to_string(),
        Some(Ok(message)) => format!("online ({message})"),
        Some(Err(reason)) => format!("unreachable ({reason})"),
    }
}
