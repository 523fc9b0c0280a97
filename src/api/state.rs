//! Handler State
//!
//! One `AppState` per portal process, cloned into every request by axum.

use std::sync::Arc;
use std::time::Instant;

use crate::backend::ClinicBackend;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    /// Source of every clinic read and write
    pub backend: Arc<dyn ClinicBackend>,
    pub sessions: Arc<SessionStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(backend: Arc<dyn ClinicBackend>, sessions: SessionStore) -> Self {
        Self {
            backend,
            sessions: Arc::new(sessions),
            started_at: Instant::now(),
        }
    }

    /// Whole seconds since the portal came up
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
