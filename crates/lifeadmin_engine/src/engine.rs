use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use lifeadmin_logging::{client_debug, client_warn};

use crate::toast::ToastTimers;
use crate::upload::{ReqwestUploader, UploadSettings, Uploader};
use crate::{EngineEvent, SubmissionId, ToastId};

enum EngineCommand {
    Upload {
        submission: SubmissionId,
        file_name: String,
        bytes: Bytes,
    },
    Probe,
    ScheduleToastDismiss {
        toast_id: ToastId,
        after: Duration,
    },
    CancelToastDismiss {
        toast_id: ToastId,
    },
}

/// Handle to the IO thread. Requests and timers run on a tokio runtime owned
/// by that thread; completions come back as [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> io::Result<Self> {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)))
    }

    pub fn with_uploader(uploader: Arc<dyn Uploader>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("lifeadmin-engine".to_string())
            .spawn(move || {
                let timers = ToastTimers::new(runtime.handle().clone(), event_tx.clone());
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Upload {
                            submission,
                            file_name,
                            bytes,
                        } => {
                            let uploader = uploader.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let result = uploader.upload(&file_name, bytes).await;
                                if let Err(err) = &result {
                                    client_warn!(
                                        "upload {} failed: {} ({})",
                                        submission,
                                        err,
                                        err.kind
                                    );
                                }
                                let _ = event_tx
                                    .send(EngineEvent::UploadCompleted { submission, result });
                            });
                        }
                        EngineCommand::Probe => {
                            let uploader = uploader.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let result = uploader.probe().await;
                                let _ = event_tx.send(EngineEvent::ProbeCompleted { result });
                            });
                        }
                        EngineCommand::ScheduleToastDismiss { toast_id, after } => {
                            client_debug!("toast {} dismiss in {:?}", toast_id, after);
                            timers.schedule(toast_id, after);
                        }
                        EngineCommand::CancelToastDismiss { toast_id } => {
                            timers.cancel(toast_id);
                        }
                    }
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn upload(&self, submission: SubmissionId, file_name: impl Into<String>, bytes: Bytes) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            submission,
            file_name: file_name.into(),
            bytes,
        });
    }

    pub fn probe(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Probe);
    }

    pub fn schedule_toast_dismiss(&self, toast_id: ToastId, after: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ScheduleToastDismiss { toast_id, after });
    }

    pub fn cancel_toast_dismiss(&self, toast_id: ToastId) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::CancelToastDismiss { toast_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}
