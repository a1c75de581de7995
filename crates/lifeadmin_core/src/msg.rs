#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User chose files through the picker.
    FilesPicked(Vec<crate::SelectedFile>),
    /// A drag entered or moved over the drop zone.
    DragOver,
    /// A drag left the drop zone.
    DragLeave,
    /// Files were dropped on the drop zone.
    FilesDropped(Vec<crate::SelectedFile>),
    /// User clicked Upload.
    SubmitClicked,
    /// Engine completion for an upload.
    UploadFinished {
        submission: crate::SubmissionId,
        outcome: Result<crate::ProcessResult, crate::ErrorInfo>,
    },
    /// User asked whether the backend is reachable.
    StatusRequested,
    /// Engine completion for a backend probe.
    BackendProbed(Result<String, String>),
    /// A toast's dwell timer fired.
    ToastExpired { toast_id: crate::ToastId },
    /// Clock tick from the shell, in milliseconds since the Unix epoch.
    Tick { now_ms: u64 },
    /// Fallback for placeholder wiring.
    NoOp,
}
