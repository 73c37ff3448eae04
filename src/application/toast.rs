// Transient notifications
use crate::util::web::generate_id;
use std::time::{Duration, Instant};

const FADE_OUT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Danger,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

/// Toasts expire on their own; expired ones are dropped the next time the
/// list is read.
#[derive(Debug)]
pub struct ToastCenter {
    toasts: Vec<Toast>,
    lifetime: Duration,
}

impl ToastCenter {
    pub fn new(display_for: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            lifetime: display_for + FADE_OUT,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.prune();
        let message = message.into();
        match kind {
            ToastKind::Danger => tracing::error!("[{}] {}", kind.as_str().to_uppercase(), message),
            ToastKind::Warning => tracing::warn!("[{}] {}", kind.as_str().to_uppercase(), message),
            _ => tracing::info!("[{}] {}", kind.as_str().to_uppercase(), message),
        }
        self.toasts.push(Toast {
            id: generate_id(),
            message,
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn active(&mut self) -> &[Toast] {
        self.prune();
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    fn prune(&mut self) {
        let lifetime = self.lifetime;
        self.toasts.retain(|t| t.shown_at.elapsed() < lifetime);
    }
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}
