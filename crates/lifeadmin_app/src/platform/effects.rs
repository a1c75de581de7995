use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use lifeadmin_core::{Effect, ErrorInfo, ErrorKind, Msg, ProcessResult};
use lifeadmin_engine::{EngineEvent, EngineHandle, FailureKind, UploadError};
use lifeadmin_logging::{client_debug, client_info};

use super::app::Inbound;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, inbound_tx: mpsc::Sender<Inbound>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(inbound_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Upload { submission, file } => {
                    client_info!(
                        "Upload submission={} file={} bytes={}",
                        submission,
                        file.name,
                        file.len()
                    );
                    self.engine.upload(submission, file.name, file.bytes);
                }
                Effect::ScheduleToastDismiss { toast_id, after } => {
                    self.engine.schedule_toast_dismiss(toast_id, after);
                }
                Effect::ProbeBackend => {
                    client_debug!("probing backend");
                    self.engine.probe();
                }
            }
        }
    }

    fn spawn_event_loop(&self, inbound_tx: mpsc::Sender<Inbound>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            if inbound_tx.send(Inbound::Msg(map_event(event))).is_err() {
                break;
            }
        });
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { submission, result } => Msg::UploadFinished {
            submission,
            outcome: result
                .map(|output| ProcessResult::from_response(&output.body))
                .map_err(map_error),
        },
        EngineEvent::ProbeCompleted { result } => {
            Msg::BackendProbed(result.map_err(|err| err.to_string()))
        }
        EngineEvent::ToastExpired { toast_id } => Msg::ToastExpired { toast_id },
    }
}

fn map_error(err: UploadError) -> ErrorInfo {
    let kind = match err.kind {
        FailureKind::Decode => ErrorKind::Decode,
        FailureKind::HttpStatus(code) => ErrorKind::HttpStatus(code),
        FailureKind::InvalidEndpoint
        | FailureKind::Network
        | FailureKind::Timeout
        | FailureKind::TooLarge { .. } => ErrorKind::Transport,
    };
    ErrorInfo::new(kind, err.message)
}
