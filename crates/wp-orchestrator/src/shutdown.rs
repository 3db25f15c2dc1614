//! Shutdown sequencer
//!
//! The ordered confirm → notify → de-register → stop → destroy protocol
//! shared by the close, log-out, and uninstall flows. De-registration of
//! channels strictly precedes subsystem stop, which strictly precedes
//! surface destruction; that ordering is the correctness-critical invariant
//! of the whole orchestrator.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use wp_core::dialogs;
use wp_core::error::SubsystemError;
use wp_core::events::SurfaceEvent;
use wp_core::types::{ShutdownKind, ShutdownOutcome, SubsystemKind};

use crate::session::SessionState;

/// Coordinates one shutdown attempt for a session
pub struct ShutdownSequencer {
    state: Arc<SessionState>,
}

impl ShutdownSequencer {
    pub(crate) fn new(state: Arc<SessionState>) -> Self {
        Self { state }
    }

    /// Run one shutdown sequence.
    ///
    /// At most one sequence is in flight per session; a concurrent trigger
    /// returns `AlreadyInProgress` without side effects. A declined
    /// confirmation aborts with no side effects and releases the sequence
    /// for later triggers. Once past the confirmation the teardown runs to
    /// completion and is not cancelable.
    pub async fn run(&self, kind: ShutdownKind) -> ShutdownOutcome {
        let state = &self.state;

        if state
            .shutdown_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Ignoring {} trigger: shutdown already in progress", kind);
            return ShutdownOutcome::AlreadyInProgress;
        }

        if !self.confirm(kind).await {
            state.shutdown_in_flight.store(false, Ordering::SeqCst);
            tracing::info!("User declined {} confirmation", kind);
            return ShutdownOutcome::Declined;
        }

        if kind == ShutdownKind::LogOut {
            state.logging_out.store(true, Ordering::SeqCst);
            if let Some(node) = state.node_handle() {
                let _ = node.stop().await;
            }
            if let Err(e) = state.services.identity.clear() {
                tracing::error!("Failed to erase persisted identity: {}", e);
            }
        }

        self.teardown(kind).await;
        ShutdownOutcome::Completed
    }

    /// Guard + confirmation step. Returns `true` when the sequence may
    /// proceed.
    ///
    /// The close variant only asks when the browser reports running and the
    /// session is not already mid-log-out; log-out and uninstall always
    /// ask.
    async fn confirm(&self, kind: ShutdownKind) -> bool {
        let state = &self.state;
        let prompt = match kind {
            ShutdownKind::Close => {
                let guard = state.browser_running.load(Ordering::SeqCst)
                    && !state.logging_out.load(Ordering::SeqCst);
                if !guard {
                    return true;
                }
                &dialogs::CLOSE_CONFIRMATION
            }
            ShutdownKind::LogOut => &dialogs::LOGOUT_CONFIRMATION,
            ShutdownKind::Uninstall => &dialogs::UNINSTALL_CONFIRMATION,
        };

        match state.current_surface() {
            Some(surface) => surface.confirm(prompt).await,
            // No surface left to ask; nothing the user could lose.
            None => true,
        }
    }

    /// The common teardown: notify → de-register → concurrent stop →
    /// destroy. Runs to completion once entered; failures are logged, never
    /// retried.
    async fn teardown(&self, kind: ShutdownKind) {
        let state = &self.state;

        // Best-effort shutdown notification while the surface still exists.
        if let Some(surface) = state.current_surface() {
            surface.send(SurfaceEvent::Closed);
        }
        tracing::info!("Closing dashboard surface ({})", kind);

        // De-register every channel before touching the subsystems so no
        // stray message can race a half-torn-down handle.
        if let Some(registrations) = state.registrations.get() {
            state.registry.unregister_all(registrations);
        }

        // Stop the node and close the browser concurrently: wait for both,
        // require neither.
        let node = state.node_handle();
        let browser = state.browser_handle();
        let (node_result, browser_result) = futures::join!(
            async {
                match &node {
                    Some(node) => node.stop().await,
                    None => Ok(()),
                }
            },
            async {
                match &browser {
                    Some(browser) => browser.stop().await,
                    None => Ok(()),
                }
            },
        );
        if let Err(e) = node_result {
            tracing::error!("Error stopping node during {}: {}", kind, e);
        }
        if let Err(e) = browser_result {
            tracing::error!("Error closing browser during {}: {}", kind, e);
        }

        // Unconditional teardown from here on. The uninstaller launches
        // even when the stop join failed above.
        if kind == ShutdownKind::Uninstall {
            match state.uninstaller_handle() {
                Some(uninstaller) => uninstaller.launch().await,
                None => tracing::warn!(
                    "{}",
                    SubsystemError::NotInitialized(SubsystemKind::Uninstaller)
                ),
            }
        }

        let surface = state.surface.write().take();
        if let Some(surface) = surface {
            surface.destroy();
        }
        *state.node.write() = None;
        *state.browser.write() = None;
        *state.installer.write() = None;
        *state.uninstaller.write() = None;
        state.closed.store(true, Ordering::SeqCst);
        tracing::info!("Dashboard session torn down");
    }
}
