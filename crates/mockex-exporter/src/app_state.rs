//! Shared application state for the exporter HTTP surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::registry::SeriesRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    registry: Arc<SeriesRegistry>,
    draining: AtomicBool,
}

impl AppState {
    pub fn new(registry: Arc<SeriesRegistry>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                registry,
                draining: AtomicBool::new(false),
            }),
        }
    }

    pub fn registry(&self) -> &SeriesRegistry {
        &self.inner.registry
    }

    /// Mark draining state (shutdown in progress).
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }

    /// Flip readiness to draining, then hold for `grace` so readiness
    /// checks see it before the listener closes.
    pub async fn drain(&self, grace: Duration) {
        self.set_draining();
        tokio::time::sleep(grace).await;
    }
}
