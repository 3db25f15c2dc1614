//! Subsystem handles
//!
//! A handle is the orchestrator's supervisory reference to one child
//! subsystem. It owns no business logic; it tracks lifecycle state and
//! forwards to the externally supplied implementation.

use std::sync::Arc;

use parking_lot::Mutex;

use wp_core::error::SubsystemError;
use wp_core::traits::Subsystem;
use wp_core::types::{SubsystemKind, SubsystemState};

/// Supervisory reference to one child subsystem
pub struct SubsystemHandle {
    kind: SubsystemKind,
    inner: Arc<dyn Subsystem>,
    state: Mutex<SubsystemState>,
}

impl SubsystemHandle {
    /// Wrap an externally supplied subsystem implementation
    pub fn new(inner: Arc<dyn Subsystem>) -> Self {
        Self {
            kind: inner.kind(),
            inner,
            state: Mutex::new(SubsystemState::Uninitialized),
        }
    }

    /// Which subsystem this handle supervises
    pub fn kind(&self) -> SubsystemKind {
        self.kind
    }

    /// Current lifecycle state
    pub fn state(&self) -> SubsystemState {
        *self.state.lock()
    }

    /// Whether the handle reached `Running` and has not been stopped
    pub fn is_running(&self) -> bool {
        matches!(self.state(), SubsystemState::Running)
    }

    /// Begin the subsystem's startup sequence.
    ///
    /// Failures are swallowed at this layer and surfaced only through
    /// subsequent status checks: on error the state stays out of `Running`.
    pub async fn launch(&self) {
        {
            let state = self.state.lock();
            if matches!(*state, SubsystemState::Running | SubsystemState::Stopping) {
                tracing::info!("{} subsystem is {}; ignoring launch", self.kind, *state);
                return;
            }
        }

        match self.inner.launch().await {
            Ok(()) => {
                *self.state.lock() = SubsystemState::Running;
                tracing::info!("Launched {} subsystem", self.kind);
            }
            Err(e) => {
                tracing::error!("Failed to launch {} subsystem: {}", self.kind, e);
            }
        }
    }

    /// Stop the subsystem.
    ///
    /// Idempotent: a handle already `Stopping` or `Stopped` resolves
    /// without re-invoking teardown work. Safe to call even if `launch`
    /// never completed. An error means genuine I/O failure in the
    /// implementation; the handle still ends up `Stopped`.
    pub async fn stop(&self) -> Result<(), SubsystemError> {
        {
            let mut state = self.state.lock();
            match *state {
                SubsystemState::Stopping | SubsystemState::Stopped => {
                    tracing::debug!("{} subsystem already {}", self.kind, *state);
                    return Ok(());
                }
                _ => *state = SubsystemState::Stopping,
            }
        }

        let result = self.inner.stop().await;
        *self.state.lock() = SubsystemState::Stopped;

        match &result {
            Ok(()) => tracing::info!("Stopped {} subsystem", self.kind),
            Err(e) => tracing::error!("Failed to stop {} subsystem: {}", self.kind, e),
        }
        result
    }

    /// Forward a version check. Errors are logged; results arrive on the
    /// surface push channel, not through a return value.
    pub async fn check_version(&self) {
        if let Err(e) = self.inner.check_version().await {
            tracing::error!("{} version check failed: {}", self.kind, e);
        }
    }

    /// Forward an update download. Same push-only contract as
    /// `check_version`.
    pub async fn download(&self) {
        if let Err(e) = self.inner.download().await {
            tracing::error!("{} download failed: {}", self.kind, e);
        }
    }
}
