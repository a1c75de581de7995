//! LifeAdmin core: pure upload state machine, result rendering and view-model helpers.
mod effect;
mod input;
mod msg;
mod render;
mod result;
mod state;
mod toast;
mod update;
mod view_model;

pub use effect::Effect;
pub use input::{disposition, DragEvent, EventDisposition, FileInput, SelectedFile};
pub use msg::Msg;
pub use render::{
    render_result, ActionLine, ActionOutcome, ActionSignal, LabeledField, Link, RenderedResult,
    TaskSummary, MISSING_FIELD, NO_OCR_TEXT, NO_STRUCTURED_DATA,
};
pub use result::{EmailResult, ParsedTask, ProcessResult, TodoistTask};
pub use state::{AppState, ErrorInfo, ErrorKind, SubmissionId, UploadState};
pub use toast::{Notifications, Toast, ToastId, ToastKind, TOAST_DWELL};
pub use update::{
    update, SELECT_FILE_NOTICE, SUCCESS_NOTICE, UPLOAD_IN_PROGRESS_NOTICE,
};
pub use view_model::{AppViewModel, ToastView, UploadPhase};
