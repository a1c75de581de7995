use std::fmt;
use std::time::Duration;

use crate::render::{render_result, RenderedResult};
use crate::view_model::{AppViewModel, ToastView, UploadPhase};
use crate::{Effect, FileInput, Notifications, ProcessResult, SelectedFile, ToastId, ToastKind};

pub type SubmissionId = u64;

/// Upload lifecycle: `Idle -> Submitting -> Completed | Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Submitting {
        submission: SubmissionId,
        file_name: String,
    },
    Completed(ProcessResult),
    Failed(ErrorInfo),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a response.
    Transport,
    /// The response body was not JSON.
    Decode,
    /// Rejected by status code; only reported when the engine runs a strict policy.
    HttpStatus(u16),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Decode => write!(f, "decode error"),
            ErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    upload: UploadState,
    rendered: Option<RenderedResult>,
    input: FileInput,
    notifications: Notifications,
    last_submission: SubmissionId,
    now_ms: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toast_dwell(dwell: Duration) -> Self {
        Self {
            notifications: Notifications::new(dwell),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let phase = match &self.upload {
            UploadState::Idle => UploadPhase::Idle,
            UploadState::Submitting { .. } => UploadPhase::Submitting,
            UploadState::Completed(_) => UploadPhase::Completed,
            UploadState::Failed(_) => UploadPhase::Failed,
        };
        let result = match &self.upload {
            UploadState::Completed(_) => self.rendered.clone(),
            _ => None,
        };
        AppViewModel {
            phase,
            busy: phase == UploadPhase::Submitting,
            result_visible: result.is_some(),
            result,
            last_error: match &self.upload {
                UploadState::Failed(error) => Some(error.clone()),
                _ => None,
            },
            selected_file: self.input.current().map(|file| file.name.clone()),
            selected_count: self.input.files().len(),
            drop_highlighted: self.input.is_highlighted(),
            toasts: self
                .notifications
                .active()
                .iter()
                .map(ToastView::from)
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn in_flight_submission(&self) -> Option<SubmissionId> {
        match &self.upload {
            UploadState::Submitting { submission, .. } => Some(*submission),
            _ => None,
        }
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn input_mut(&mut self) -> &mut FileInput {
        self.mark_dirty();
        &mut self.input
    }

    pub(crate) fn selected_file(&self) -> Option<&SelectedFile> {
        self.input.current()
    }

    pub(crate) fn set_clock(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Enters `Submitting`; any previous result or error stops being visible.
    pub(crate) fn begin_submission(&mut self, file: &SelectedFile) -> SubmissionId {
        self.last_submission += 1;
        self.upload = UploadState::Submitting {
            submission: self.last_submission,
            file_name: file.name.clone(),
        };
        self.rendered = None;
        self.mark_dirty();
        self.last_submission
    }

    pub(crate) fn complete(&mut self, result: ProcessResult) {
        self.rendered = Some(render_result(&result));
        self.upload = UploadState::Completed(result);
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, error: ErrorInfo) {
        self.rendered = None;
        self.upload = UploadState::Failed(error);
        self.mark_dirty();
    }

    /// Adds a toast and returns the effect that arms its dismissal timer.
    pub(crate) fn notify(&mut self, message: impl Into<String>, kind: ToastKind) -> Effect {
        let toast_id = self.notifications.notify(message, kind, self.now_ms);
        self.mark_dirty();
        Effect::ScheduleToastDismiss {
            toast_id,
            after: self.notifications.dwell(),
        }
    }

    pub(crate) fn expire_toast(&mut self, toast_id: ToastId) {
        if self.notifications.expire(toast_id) {
            self.mark_dirty();
        }
    }
}
