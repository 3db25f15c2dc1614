//! Per-surface orchestrator session
//!
//! All mutable orchestrator state lives in one owned session object created
//! together with the UI surface and torn down when it closes: the surface
//! reference, the four subsystem handle slots, the browser-running and
//! logging-out flags, and the shutdown latch. Handlers treat an absent
//! handle as a possible state and report a typed "not initialized" outcome
//! instead of dereferencing unconditionally.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use futures::FutureExt;
use parking_lot::RwLock;
use serde_json::Value;

use wp_core::channels;
use wp_core::config::DashboardConfig;
use wp_core::dialogs::WarningNotice;
use wp_core::error::SubsystemError;
use wp_core::events::SurfaceEvent;
use wp_core::traits::{
    FaucetService, IdentityStore, ReferralApi, Subsystem, UiSurface, VersionReader, WalletService,
};
use wp_core::types::{ShutdownKind, ShutdownOutcome, SubsystemKind};

use crate::referral::{self, ReferralStore, REFERRAL_FILE};
use crate::registry::{ChannelRegistry, Registration};
use crate::shutdown::ShutdownSequencer;
use crate::subsystem::SubsystemHandle;
use crate::wallet::BalancePoller;

/// Externally supplied subsystem implementations and collaborator services
#[derive(Clone)]
pub struct Services {
    pub node: Arc<dyn Subsystem>,
    pub browser: Arc<dyn Subsystem>,
    pub installer: Arc<dyn Subsystem>,
    pub uninstaller: Arc<dyn Subsystem>,
    pub wallet: Arc<dyn WalletService>,
    pub faucet: Arc<dyn FaucetService>,
    pub referral: Arc<dyn ReferralApi>,
    pub identity: Arc<dyn IdentityStore>,
    pub versions: Arc<dyn VersionReader>,
}

/// Mutable state shared by the session's handlers and the shutdown
/// sequencer
pub(crate) struct SessionState {
    pub(crate) config: DashboardConfig,
    pub(crate) services: Services,
    pub(crate) registry: ChannelRegistry,
    pub(crate) registrations: OnceLock<Vec<Registration>>,
    pub(crate) surface: RwLock<Option<Arc<dyn UiSurface>>>,
    pub(crate) node: RwLock<Option<Arc<SubsystemHandle>>>,
    pub(crate) browser: RwLock<Option<Arc<SubsystemHandle>>>,
    pub(crate) installer: RwLock<Option<Arc<SubsystemHandle>>>,
    pub(crate) uninstaller: RwLock<Option<Arc<SubsystemHandle>>>,
    pub(crate) browser_running: AtomicBool,
    pub(crate) logging_out: AtomicBool,
    pub(crate) shutdown_in_flight: AtomicBool,
    pub(crate) closed: AtomicBool,
    pub(crate) referral_store: ReferralStore,
}

impl SessionState {
    pub(crate) fn current_surface(&self) -> Option<Arc<dyn UiSurface>> {
        self.surface.read().clone()
    }

    pub(crate) fn node_handle(&self) -> Option<Arc<SubsystemHandle>> {
        self.node.read().clone()
    }

    pub(crate) fn browser_handle(&self) -> Option<Arc<SubsystemHandle>> {
        self.browser.read().clone()
    }

    pub(crate) fn installer_handle(&self) -> Option<Arc<SubsystemHandle>> {
        self.installer.read().clone()
    }

    pub(crate) fn uninstaller_handle(&self) -> Option<Arc<SubsystemHandle>> {
        self.uninstaller.read().clone()
    }

    /// Typed "subsystem not initialized" outcome for handlers that found an
    /// empty slot
    pub(crate) fn report_missing(kind: SubsystemKind) {
        tracing::warn!("{}", SubsystemError::NotInitialized(kind));
    }
}

/// One live UI surface and its orchestrator state
pub struct OrchestratorSession {
    state: Arc<SessionState>,
}

impl OrchestratorSession {
    /// Create a session for a freshly created UI surface and register its
    /// channel handlers in bulk.
    pub fn new(surface: Arc<dyn UiSurface>, services: Services, config: DashboardConfig) -> Self {
        let referral_store = ReferralStore::new(config.data_dir.join(REFERRAL_FILE));
        let state = Arc::new(SessionState {
            surface: RwLock::new(Some(surface)),
            node: RwLock::new(Some(Arc::new(SubsystemHandle::new(Arc::clone(
                &services.node,
            ))))),
            browser: RwLock::new(Some(Arc::new(SubsystemHandle::new(Arc::clone(
                &services.browser,
            ))))),
            installer: RwLock::new(Some(Arc::new(SubsystemHandle::new(Arc::clone(
                &services.installer,
            ))))),
            uninstaller: RwLock::new(Some(Arc::new(SubsystemHandle::new(Arc::clone(
                &services.uninstaller,
            ))))),
            browser_running: AtomicBool::new(false),
            logging_out: AtomicBool::new(false),
            shutdown_in_flight: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            registry: ChannelRegistry::new(),
            registrations: OnceLock::new(),
            referral_store,
            services,
            config,
        });

        let registrations = build_registrations(&state);
        state.registry.register_all(&registrations);
        let _ = state.registrations.set(registrations);

        Self { state }
    }

    /// Deliver a message and let its handler run as an independent task.
    ///
    /// Handlers never block the caller; a multi-step workflow (polling,
    /// shutdown) runs while new messages keep arriving.
    pub fn dispatch(&self, channel: &str, payload: Value) {
        if let Some(fut) = self.state.registry.dispatch(channel, payload) {
            tokio::spawn(fut);
        }
    }

    /// Deliver a message and wait for its handler to finish.
    pub async fn handle(&self, channel: &str, payload: Value) {
        if let Some(fut) = self.state.registry.dispatch(channel, payload) {
            fut.await;
        }
    }

    /// Begin the shutdown sequence (close variant). Hosts intercepting a
    /// window close call this instead of destroying the window themselves.
    pub async fn request_close(&self) -> ShutdownOutcome {
        ShutdownSequencer::new(Arc::clone(&self.state))
            .run(ShutdownKind::Close)
            .await
    }

    /// Begin the log-out variant of the shutdown sequence.
    pub async fn log_out(&self) -> ShutdownOutcome {
        ShutdownSequencer::new(Arc::clone(&self.state))
            .run(ShutdownKind::LogOut)
            .await
    }

    /// Begin the uninstall variant of the shutdown sequence.
    pub async fn launch_uninstall(&self) -> ShutdownOutcome {
        ShutdownSequencer::new(Arc::clone(&self.state))
            .run(ShutdownKind::Uninstall)
            .await
    }

    /// Whether the session finished its shutdown sequence
    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }

    /// Last browser-running flag pushed by the browser subsystem
    pub fn is_browser_running(&self) -> bool {
        self.state.browser_running.load(Ordering::SeqCst)
    }

    /// Show a warning dialog on the session's surface, if it still exists.
    pub async fn alert(&self, notice: &WarningNotice) {
        if let Some(surface) = self.state.current_surface() {
            surface.alert(notice).await;
        }
    }

    /// The session's channel registry
    pub fn registry(&self) -> &ChannelRegistry {
        &self.state.registry
    }

    pub(crate) fn state(&self) -> &Arc<SessionState> {
        &self.state
    }
}

/// Build the handler table for one session.
///
/// Handlers hold the session state weakly (the state owns the handler
/// table, so a strong reference would cycle) and re-check it after
/// suspension points; the surface or a subsystem may have been torn down
/// since the message was sent.
fn build_registrations(state: &Arc<SessionState>) -> Vec<Registration> {
    fn entry<Fut>(
        channel: &'static str,
        state: &Arc<SessionState>,
        f: impl Fn(Arc<SessionState>, Value) -> Fut + Send + Sync + 'static,
    ) -> Registration
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Arc::downgrade(state);
        Registration::new(channel, move |payload| match state.upgrade() {
            Some(state) => f(state, payload).boxed(),
            None => {
                tracing::debug!("Session dropped; ignoring message on {}", channel);
                async {}.boxed()
            }
        })
    }

    vec![
        entry(channels::NODE_LAUNCH, state, |s, _payload| async move {
            match s.node_handle() {
                Some(node) => node.launch().await,
                None => SessionState::report_missing(SubsystemKind::Node),
            }
        }),
        entry(channels::NODE_STOP, state, |s, _payload| async move {
            match s.node_handle() {
                Some(node) => {
                    let _ = node.stop().await;
                }
                None => SessionState::report_missing(SubsystemKind::Node),
            }
        }),
        entry(channels::NODE_CHECK_VERSION, state, |s, _payload| async move {
            match s.node_handle() {
                Some(node) => node.check_version().await,
                None => SessionState::report_missing(SubsystemKind::Node),
            }
        }),
        entry(channels::NODE_DOWNLOAD, state, |s, _payload| async move {
            match s.node_handle() {
                Some(node) => node.download().await,
                None => SessionState::report_missing(SubsystemKind::Node),
            }
        }),
        entry(channels::BROWSER_LAUNCH, state, |s, _payload| async move {
            match s.browser_handle() {
                Some(browser) => browser.launch().await,
                None => SessionState::report_missing(SubsystemKind::Browser),
            }
        }),
        entry(channels::BROWSER_STATUS, state, |s, payload| async move {
            match payload.as_bool() {
                Some(running) => {
                    s.browser_running.store(running, Ordering::SeqCst);
                    tracing::debug!("Browser running flag set to {}", running);
                }
                None => tracing::warn!("browser:status payload was not a boolean"),
            }
        }),
        entry(
            channels::BROWSER_CHECK_VERSION,
            state,
            |s, _payload| async move {
                match s.browser_handle() {
                    Some(browser) => browser.check_version().await,
                    None => SessionState::report_missing(SubsystemKind::Browser),
                }
            },
        ),
        entry(channels::BROWSER_DOWNLOAD, state, |s, _payload| async move {
            match s.browser_handle() {
                Some(browser) => browser.download().await,
                None => SessionState::report_missing(SubsystemKind::Browser),
            }
        }),
        entry(
            channels::INSTALLER_CHECK_VERSION,
            state,
            |s, _payload| async move {
                match s.installer_handle() {
                    Some(installer) => installer.check_version().await,
                    None => SessionState::report_missing(SubsystemKind::Installer),
                }
            },
        ),
        entry(
            channels::WALLET_CHECK_BALANCE_AND_FUND,
            state,
            |s, _payload| async move {
                let Some(surface) = s.current_surface() else {
                    tracing::warn!("No surface to report wallet status to");
                    return;
                };
                let poller = BalancePoller::new(
                    s.config.balance_timeout,
                    s.config.balance_retry_interval,
                );
                if let Err(e) = poller
                    .run(
                        s.services.wallet.as_ref(),
                        s.services.faucet.as_ref(),
                        surface.as_ref(),
                    )
                    .await
                {
                    // No reply path on this channel; the log is the report.
                    tracing::error!("Balance polling failed: {}", e);
                }
            },
        ),
        entry(channels::REFERRAL_NOTIFY, state, |s, _payload| async move {
            if let Err(e) = referral::send_generated_event(
                &s.referral_store,
                s.services.referral.as_ref(),
                s.services.wallet.as_ref(),
            )
            .await
            {
                tracing::error!("Referral notification failed: {}", e);
            }
        }),
        entry(channels::APP_CLOSE, state, |s, _payload| async move {
            ShutdownSequencer::new(s).run(ShutdownKind::Close).await;
        }),
        entry(channels::APP_MINIMIZE, state, |s, _payload| async move {
            match s.current_surface() {
                Some(surface) => surface.minimize(),
                None => tracing::warn!("No surface to minimize"),
            }
        }),
        entry(
            channels::APP_OPEN_DOWNLOAD_LINK,
            state,
            |s, payload| async move {
                let Some(url) = payload.as_str().map(str::to_owned) else {
                    tracing::warn!("app:openDownloadLink payload was not a string");
                    return;
                };
                match s.current_surface() {
                    Some(surface) => surface.open_external(&url),
                    None => tracing::warn!("No surface to open {} from", url),
                }
            },
        ),
        entry(channels::APP_GET_VERSION, state, |s, _payload| async move {
            let Some(surface) = s.current_surface() else {
                return;
            };
            match s.services.versions.dashboard_version() {
                Ok(version) => surface.send(SurfaceEvent::Version { version }),
                Err(e) => tracing::error!("Failed to read dashboard version: {}", e),
            }
        }),
        entry(
            channels::APP_GET_IDENTIFIER,
            state,
            |s, _payload| async move {
                let Some(surface) = s.current_surface() else {
                    return;
                };
                match s.services.identity.identifier() {
                    Ok(identifier) => surface.send(SurfaceEvent::Identifier { identifier }),
                    Err(e) => tracing::error!("Failed to read identifier: {}", e),
                }
            },
        ),
        entry(channels::LOG_OUT, state, |s, _payload| async move {
            ShutdownSequencer::new(s).run(ShutdownKind::LogOut).await;
        }),
        entry(channels::UNINSTALL_LAUNCH, state, |s, _payload| async move {
            ShutdownSequencer::new(s).run(ShutdownKind::Uninstall).await;
        }),
    ]
}
