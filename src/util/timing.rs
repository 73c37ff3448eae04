// Timer helpers: debounce, throttle, sleep
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

pub async fn sleep(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Trailing-edge debounce: each call re-arms the timer, only the last call
/// within `delay` runs.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Must be called from within a Tokio runtime.
    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });

        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

/// Leading-edge throttle: at most one call runs per `limit` window, the
/// rest are dropped.
pub struct Throttle {
    limit: Duration,
    last_run: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            last_run: Mutex::new(None),
        }
    }

    /// Returns whether `f` ran.
    pub fn call<F: FnOnce()>(&self, f: F) -> bool {
        let mut last_run = self.last_run.lock().unwrap_or_else(|p| p.into_inner());
        let open = match *last_run {
            Some(at) => at.elapsed() >= self.limit,
            None => true,
        };
        if !open {
            return false;
        }
        *last_run = Some(Instant::now());
        drop(last_run);
        f();
        true
    }
}
