use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the file to `/process` as multipart field `file`.
    Upload {
        submission: crate::SubmissionId,
        file: crate::SelectedFile,
    },
    ScheduleToastDismiss {
        toast_id: crate::ToastId,
        after: Duration,
    },
    ProbeBackend,
}
