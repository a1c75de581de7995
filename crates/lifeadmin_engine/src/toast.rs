use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use lifeadmin_logging::client_trace;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, ToastId};

/// One independent dismissal timer per toast.
///
/// Each timer is its own task with its own cancellation token, so arming or
/// cancelling one toast never shifts another toast's deadline.
pub struct ToastTimers {
    runtime: Handle,
    events: mpsc::Sender<EngineEvent>,
    pending: Arc<Mutex<HashMap<ToastId, CancellationToken>>>,
}

impl ToastTimers {
    pub fn new(runtime: Handle, events: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            runtime,
            events,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Arms a timer that reports [`EngineEvent::ToastExpired`] after `after`.
    /// Re-arming an id replaces its previous timer.
    pub fn schedule(&self, toast_id: ToastId, after: Duration) {
        let token = CancellationToken::new();
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.insert(toast_id, token.clone()) {
                previous.cancel();
            }
        }

        let events = self.events.clone();
        let pending = self.pending.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    client_trace!("toast {} timer cancelled", toast_id);
                }
                _ = tokio::time::sleep(after) => {
                    if let Ok(mut pending) = pending.lock() {
                        pending.remove(&toast_id);
                    }
                    let _ = events.send(EngineEvent::ToastExpired { toast_id });
                }
            }
        });
    }

    /// Stops a toast's timer; returns `false` if none was pending.
    pub fn cancel(&self, toast_id: ToastId) -> bool {
        let token = match self.pending.lock() {
            Ok(mut pending) => pending.remove(&toast_id),
            Err(_) => None,
        };
        match token {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|pending| pending.len()).unwrap_or(0)
    }
}
