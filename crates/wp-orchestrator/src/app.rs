//! Top-level orchestrator
//!
//! Owns the externally supplied services and at most one live session.
//! The embedding shell forwards its host-runtime lifecycle hooks here:
//! surface (re)creation on activate, and process termination when the last
//! surface closes.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use wp_core::channels;
use wp_core::config::DashboardConfig;
use wp_core::dialogs;
use wp_core::traits::UiSurface;

use crate::session::{OrchestratorSession, Services};

/// The dashboard's subsystem lifecycle orchestrator
pub struct Orchestrator {
    config: DashboardConfig,
    services: Services,
    session: Mutex<Option<Arc<OrchestratorSession>>>,
    shutdown: CancellationToken,
}

impl Orchestrator {
    /// Create an orchestrator over the given services
    pub fn new(config: DashboardConfig, services: Services) -> Self {
        Self {
            config,
            services,
            session: Mutex::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    /// Ensure a live session exists, creating one for `surface` if none.
    ///
    /// A session that finished its shutdown sequence is replaced; a live
    /// one is kept and the new surface ignored, so at most one set of
    /// subsystem handles ever exists.
    pub async fn activate(&self, surface: Arc<dyn UiSurface>) -> Arc<OrchestratorSession> {
        let mut slot = self.session.lock().await;

        if let Some(session) = slot.as_ref() {
            if !session.is_closed() {
                tracing::debug!("Session already live; ignoring activate");
                return Arc::clone(session);
            }
        }

        tracing::info!("Creating dashboard session");
        let session = Arc::new(OrchestratorSession::new(
            surface,
            self.services.clone(),
            self.config.clone(),
        ));

        // Kick off the initial node version check, the same way the
        // dashboard window does on creation.
        session.handle(channels::NODE_CHECK_VERSION, Value::Null).await;

        *slot = Some(Arc::clone(&session));
        session
    }

    /// The live session, if any
    pub async fn session(&self) -> Option<Arc<OrchestratorSession>> {
        self.session
            .lock()
            .await
            .as_ref()
            .filter(|session| !session.is_closed())
            .map(Arc::clone)
    }

    /// Host hook: a fatal process-level error escaped.
    ///
    /// Send-buffer exhaustion and connection timeouts raise a modal
    /// warning on the live surface; everything else only logs.
    pub async fn report_fatal_error(&self, error: &str) {
        tracing::error!("Caught fatal error: {}", error);
        if let Some(notice) = dialogs::warning_for_error(error) {
            if let Some(session) = self.session().await {
                session.alert(notice).await;
            }
        }
    }

    /// Host hook: the last UI surface closed; signal process termination.
    pub fn handle_all_surfaces_closed(&self) {
        tracing::info!("All surfaces closed; signalling process exit");
        self.shutdown.cancel();
    }

    /// Token cancelled when the process should exit
    pub fn shutdown_signal(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}
