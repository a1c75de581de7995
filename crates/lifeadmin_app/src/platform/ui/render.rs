use lifeadmin_core::{AppViewModel, ToastKind, UploadPhase};

/// Renders the view model as the shell's screen text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = Vec::new();

    let selection = match (&view.selected_file, view.selected_count) {
        (Some(name), 1) => name.clone(),
        (Some(name), count) => format!("{name} (+{} more, only the first is sent)", count - 1),
        (None, _) => "none".to_string(),
    };
    let drop_zone = if view.drop_highlighted {
        " [drop zone active]"
    } else {
        ""
    };
    out.push(format!("Selected: {selection}{drop_zone}"));

    let status = match view.phase {
        UploadPhase::Idle => "Ready".to_string(),
        UploadPhase::Submitting => "Processing...".to_string(),
        UploadPhase::Completed => "Done".to_string(),
        UploadPhase::Failed => match &view.last_error {
            Some(error) => format!("Failed ({})", error.kind),
            None => "Failed".to_string(),
        },
    };
    out.push(format!("Status: {status}"));

    if let Some(result) = view.result.as_ref().filter(|_| view.result_visible) {
        out.push("Task summary:".to_string());
        out.extend(result.task_summary.lines().into_iter().map(indent));
        out.push("Raw text:".to_string());
        out.extend(result.raw_text.lines().map(indent));
        out.push("Actions performed:".to_string());
        if result.actions.is_empty() {
            out.push(indent("(none reported)"));
        }
        out.extend(result.actions.iter().map(|line| indent(line.to_text())));
    }

    for toast in &view.toasts {
        let tag = match toast.kind {
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
        };
        out.push(format!("[{tag}] {}", toast.message));
    }

    out.join("\n")
}

fn indent(line: impl AsRef<str>) -> String {
    format!("  {}", line.as_ref())
}
