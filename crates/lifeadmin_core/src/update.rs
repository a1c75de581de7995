use lifeadmin_logging::{client_debug, client_info, client_warn};

use crate::{AppState, Effect, ErrorInfo, Msg, ProcessResult, SubmissionId, ToastKind, UploadState};

pub const SELECT_FILE_NOTICE: &str = "Please select a file.";
pub const UPLOAD_IN_PROGRESS_NOTICE: &str = "An upload is already in progress.";
pub const SUCCESS_NOTICE: &str = "File processed successfully!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesPicked(files) => {
            client_debug!("picker selected {} file(s)", files.len());
            state.input_mut().pick(files);
            Vec::new()
        }
        Msg::DragOver => {
            state.input_mut().drag_over();
            Vec::new()
        }
        Msg::DragLeave => {
            state.input_mut().drag_leave();
            Vec::new()
        }
        Msg::FilesDropped(files) => {
            client_debug!("drop replaced selection with {} file(s)", files.len());
            state.input_mut().drop_files(files);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::UploadFinished {
            submission,
            outcome,
        } => finish_upload(&mut state, submission, outcome),
        Msg::StatusRequested => vec![Effect::ProbeBackend],
        Msg::BackendProbed(Ok(message)) => {
            vec![state.notify(format!("Backend: {message}"), ToastKind::Success)]
        }
        Msg::BackendProbed(Err(message)) => {
            vec![state.notify(format!("Backend unreachable: {message}"), ToastKind::Error)]
        }
        Msg::ToastExpired { toast_id } => {
            state.expire_toast(toast_id);
            Vec::new()
        }
        Msg::Tick { now_ms } => {
            state.set_clock(now_ms);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    // At most one submission is in flight; a second trigger is turned away.
    if let Some(in_flight) = state.in_flight_submission() {
        client_warn!("submit ignored: submission {} still in flight", in_flight);
        return vec![state.notify(UPLOAD_IN_PROGRESS_NOTICE, ToastKind::Error)];
    }

    let Some(file) = state.selected_file().cloned() else {
        client_info!("submit ignored: no file selected");
        return vec![state.notify(SELECT_FILE_NOTICE, ToastKind::Error)];
    };

    let submission = state.begin_submission(&file);
    client_info!(
        "submission {} started file={} bytes={}",
        submission,
        file.name,
        file.len()
    );
    vec![Effect::Upload { submission, file }]
}

fn finish_upload(
    state: &mut AppState,
    submission: SubmissionId,
    outcome: Result<ProcessResult, ErrorInfo>,
) -> Vec<Effect> {
    if state.in_flight_submission() != Some(submission) {
        client_warn!(
            "discarding stale outcome for submission {} (state: {})",
            submission,
            phase_name(state.upload())
        );
        return Vec::new();
    }

    match outcome {
        Ok(result) => {
            client_info!("submission {} completed", submission);
            state.complete(result);
            vec![state.notify(SUCCESS_NOTICE, ToastKind::Success)]
        }
        Err(error) => {
            client_warn!("submission {} failed: {} ({})", submission, error.message, error.kind);
            let notice = format!("Error: {}", error.message);
            state.fail(error);
            vec![state.notify(notice, ToastKind::Error)]
        }
    }
}

fn phase_name(upload: &UploadState) -> &'static str {
    match upload {
        UploadState::Idle => "idle",
        UploadState::Submitting { .. } => "submitting",
        UploadState::Completed(_) => "completed",
        UploadState::Failed(_) => "failed",
    }
}
