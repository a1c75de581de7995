//! LifeAdmin engine: upload transport, toast timers and effect execution.
mod engine;
mod toast;
mod types;
mod upload;

pub use engine::EngineHandle;
pub use toast::ToastTimers;
pub use types::{EngineEvent, FailureKind, SubmissionId, ToastId, UploadError, UploadOutput};
pub use upload::{interpret_response, ReqwestUploader, SuccessPolicy, UploadSettings, Uploader};
