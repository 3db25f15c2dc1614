//! Test doubles shared by the unit tests in this crate

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use wp_core::config::DashboardConfig;
use wp_core::dialogs::{ConfirmPrompt, WarningNotice};
use wp_core::error::{CoreError, SubsystemError, WalletError};
use wp_core::events::SurfaceEvent;
use wp_core::traits::{
    FaucetService, IdentityStore, ReferralApi, Subsystem, UiSurface, VersionReader, WalletService,
};
use wp_core::types::SubsystemKind;

use crate::session::Services;

/// Shared, ordered record of observable effects
#[derive(Clone)]
pub(crate) struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    pub(crate) fn contains(&self, entry: &str) -> bool {
        self.entries.lock().iter().any(|e| e == entry)
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

/// Subsystem double recording lifecycle calls in the journal
pub(crate) struct FakeSubsystem {
    kind: SubsystemKind,
    journal: Journal,
    launch_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    check_version_calls: AtomicUsize,
    fail_stop: AtomicBool,
    stop_delay: Mutex<Option<Duration>>,
    stop_hook: Mutex<Option<Box<dyn Fn() + Send + Sync>>>,
}

impl FakeSubsystem {
    pub(crate) fn new(kind: SubsystemKind, journal: Journal) -> Arc<Self> {
        Arc::new(Self {
            kind,
            journal,
            launch_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            check_version_calls: AtomicUsize::new(0),
            fail_stop: AtomicBool::new(false),
            stop_delay: Mutex::new(None),
            stop_hook: Mutex::new(None),
        })
    }

    pub(crate) fn launch_calls(&self) -> usize {
        self.launch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn check_version_calls(&self) -> usize {
        self.check_version_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_stop(&self) {
        self.fail_stop.store(true, Ordering::SeqCst);
    }

    pub(crate) fn set_stop_delay(&self, delay: Duration) {
        *self.stop_delay.lock() = Some(delay);
    }

    pub(crate) fn set_stop_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.stop_hook.lock() = Some(Box::new(hook));
    }
}

#[async_trait]
impl Subsystem for FakeSubsystem {
    fn kind(&self) -> SubsystemKind {
        self.kind
    }

    async fn launch(&self) -> Result<(), SubsystemError> {
        self.launch_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push(format!("launch:{}", self.kind));
        Ok(())
    }

    async fn stop(&self) -> Result<(), SubsystemError> {
        let delay = *self.stop_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(hook) = self.stop_hook.lock().as_ref() {
            hook();
        }
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push(format!("stop:{}", self.kind));
        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(SubsystemError::Stop {
                kind: self.kind,
                reason: "pipe closed".to_string(),
            });
        }
        Ok(())
    }

    async fn check_version(&self) -> Result<(), SubsystemError> {
        self.check_version_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push(format!("check_version:{}", self.kind));
        Ok(())
    }

    async fn download(&self) -> Result<(), SubsystemError> {
        self.journal.push(format!("download:{}", self.kind));
        Ok(())
    }
}

/// Surface double with scripted confirmation answers
pub(crate) struct MockSurface {
    journal: Journal,
    confirm_answers: Mutex<Vec<bool>>,
    confirm_calls: AtomicUsize,
}

impl MockSurface {
    pub(crate) fn new(journal: Journal) -> Arc<Self> {
        Arc::new(Self {
            journal,
            confirm_answers: Mutex::new(Vec::new()),
            confirm_calls: AtomicUsize::new(0),
        })
    }

    /// Queue an answer for the next confirmation; unanswered prompts
    /// default to confirmed.
    pub(crate) fn push_confirm_answer(&self, answer: bool) {
        self.confirm_answers.lock().push(answer);
    }

    pub(crate) fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UiSurface for MockSurface {
    fn send(&self, event: SurfaceEvent) {
        self.journal.push(format!("send:{}", event.channel()));
    }

    async fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push("confirm");
        let mut answers = self.confirm_answers.lock();
        if answers.is_empty() {
            true
        } else {
            answers.remove(0)
        }
    }

    async fn alert(&self, notice: &WarningNotice) {
        self.journal.push(format!("alert:{}", notice.title));
    }

    fn minimize(&self) {
        self.journal.push("minimize");
    }

    fn open_external(&self, url: &str) {
        self.journal.push(format!("open:{}", url));
    }

    fn destroy(&self) {
        self.journal.push("destroy");
    }
}

struct FakeWallet;

#[async_trait]
impl WalletService for FakeWallet {
    async fn address(&self) -> Result<String, WalletError> {
        Ok("0xabc".to_string())
    }
}

struct FakeFaucet;

#[async_trait]
impl FaucetService for FakeFaucet {
    async fn request_airdrop(&self, _address: &str) -> Result<(), WalletError> {
        Ok(())
    }

    async fn balance(&self, _address: &str) -> Result<f64, WalletError> {
        Ok(1.0)
    }
}

struct FakeReferralApi;

#[async_trait]
impl ReferralApi for FakeReferralApi {
    async fn notify_generated(
        &self,
        _referral_code: &str,
        _address: &str,
    ) -> Result<(), WalletError> {
        Ok(())
    }
}

struct FakeIdentity {
    journal: Journal,
}

impl IdentityStore for FakeIdentity {
    fn identifier(&self) -> Result<String, CoreError> {
        Ok("id-0001".to_string())
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.journal.push("identity:clear");
        Ok(())
    }
}

struct FakeVersions;

impl VersionReader for FakeVersions {
    fn dashboard_version(&self) -> Result<String, CoreError> {
        Ok("0.1.0".to_string())
    }
}

/// Everything a session test needs in one place
pub(crate) struct TestHarness {
    pub(crate) services: Services,
    pub(crate) surface: Arc<MockSurface>,
    pub(crate) node: Arc<FakeSubsystem>,
    pub(crate) browser: Arc<FakeSubsystem>,
    pub(crate) installer: Arc<FakeSubsystem>,
    pub(crate) uninstaller: Arc<FakeSubsystem>,
    pub(crate) journal: Journal,
}

pub(crate) fn harness() -> TestHarness {
    let journal = Journal::new();
    let surface = MockSurface::new(journal.clone());
    let node = FakeSubsystem::new(SubsystemKind::Node, journal.clone());
    let browser = FakeSubsystem::new(SubsystemKind::Browser, journal.clone());
    let installer = FakeSubsystem::new(SubsystemKind::Installer, journal.clone());
    let uninstaller = FakeSubsystem::new(SubsystemKind::Uninstaller, journal.clone());

    let services = Services {
        node: node.clone(),
        browser: browser.clone(),
        installer: installer.clone(),
        uninstaller: uninstaller.clone(),
        wallet: Arc::new(FakeWallet),
        faucet: Arc::new(FakeFaucet),
        referral: Arc::new(FakeReferralApi),
        identity: Arc::new(FakeIdentity {
            journal: journal.clone(),
        }),
        versions: Arc::new(FakeVersions),
    };

    TestHarness {
        services,
        surface,
        node,
        browser,
        installer,
        uninstaller,
        journal,
    }
}

pub(crate) fn test_config() -> DashboardConfig {
    DashboardConfig {
        data_dir: std::env::temp_dir(),
        ..Default::default()
    }
}
