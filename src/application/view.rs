// Everything the UI owns, behind one lock
use crate::application::chart_manager::ChartManager;
use crate::application::toast::{ToastCenter, ToastKind};
use crate::domain::session::SessionState;
use crate::infrastructure::document::Document;
use std::sync::{Arc, Mutex, MutexGuard};

pub const UNCAUGHT_ERROR_MESSAGE: &str = "An error occurred";

/// The page model, its live charts, pending toasts and session state.
/// Mutations are synchronous; the lock is never held across an await.
#[derive(Debug)]
pub struct View {
    pub document: Document,
    pub charts: ChartManager,
    pub toasts: ToastCenter,
    pub session: SessionState,
}

impl View {
    pub fn new(document: Document, toasts: ToastCenter, session: SessionState) -> Self {
        Self {
            document,
            charts: ChartManager::new(),
            toasts,
            session,
        }
    }

    pub fn into_shared(self) -> SharedView {
        Arc::new(Mutex::new(self))
    }
}

pub type SharedView = Arc<Mutex<View>>;

/// A panic while holding the lock must not take the page down with it.
pub fn lock_view(view: &SharedView) -> MutexGuard<'_, View> {
    view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Surface an otherwise unhandled failure as a generic toast. Nothing else
/// in the view changes.
pub fn report_uncaught(view: &SharedView, detail: &str) {
    tracing::error!("Global error: {}", detail);
    lock_view(view)
        .toasts
        .show(UNCAUGHT_ERROR_MESSAGE, ToastKind::Danger);
}
