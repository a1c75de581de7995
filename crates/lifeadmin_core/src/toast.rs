use std::time::Duration;

pub type ToastId = u64;

/// How long a toast stays on screen before its timer removes it.
pub const TOAST_DWELL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub created_at_ms: u64,
}

/// Transient notices in insertion order.
///
/// There is no cap on how many can be active at once; each one is removed
/// only when its own timer reports back through [`Notifications::expire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notifications {
    toasts: Vec<Toast>,
    next_id: ToastId,
    dwell: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(TOAST_DWELL)
    }
}

impl Notifications {
    pub fn new(dwell: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
            dwell,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind, now_ms: u64) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            created_at_ms: now_ms,
        });
        id
    }

    /// Removes the toast; returns `false` if it was already gone.
    pub fn expire(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }
}
