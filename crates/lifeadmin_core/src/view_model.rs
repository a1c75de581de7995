use crate::{ErrorInfo, RenderedResult, Toast, ToastId, ToastKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Submitting,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: UploadPhase,
    pub busy: bool,
    pub result_visible: bool,
    /// Fragments of the latest completed submission; `None` unless completed.
    pub result: Option<RenderedResult>,
    pub last_error: Option<ErrorInfo>,
    pub selected_file: Option<String>,
    pub selected_count: usize,
    pub drop_highlighted: bool,
    pub toasts: Vec<ToastView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
}

impl From<&Toast> for ToastView {
    fn from(toast: &Toast) -> Self {
        Self {
            id: toast.id,
            message: toast.message.clone(),
            kind: toast.kind,
        }
    }
}
