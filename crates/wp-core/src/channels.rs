//! Message channel names
//!
//! Named channels shared between the UI surface and the orchestrator.
//! The orchestrator registers the inbound set in bulk when a surface is
//! created and removes exactly that set when the surface shuts down.

/// Start the node's launch sequence
pub const NODE_LAUNCH: &str = "node:launch";
/// Stop the node
pub const NODE_STOP: &str = "node:stop";
/// Trigger an async node version check
pub const NODE_CHECK_VERSION: &str = "node:checkVersion";
/// Trigger an async node update download
pub const NODE_DOWNLOAD: &str = "node:download";

/// Start the browser's launch sequence
pub const BROWSER_LAUNCH: &str = "browser:launch";
/// Out-of-band browser running flag (bool payload)
pub const BROWSER_STATUS: &str = "browser:status";
/// Trigger an async browser version check
pub const BROWSER_CHECK_VERSION: &str = "browser:checkVersion";
/// Trigger an async browser update download
pub const BROWSER_DOWNLOAD: &str = "browser:download";

/// Trigger an async installer version check
pub const INSTALLER_CHECK_VERSION: &str = "installer:checkVersion";

/// Start the bounded balance polling loop
pub const WALLET_CHECK_BALANCE_AND_FUND: &str = "wallet:checkBalanceAndFund";
/// One-time referral generated-event notification
pub const REFERRAL_NOTIFY: &str = "referral:notify";

/// Begin the shutdown sequencer (close variant)
pub const APP_CLOSE: &str = "app:close";
/// Minimize the UI surface
pub const APP_MINIMIZE: &str = "app:minimize";
/// Open a URL in the system browser (string payload)
pub const APP_OPEN_DOWNLOAD_LINK: &str = "app:openDownloadLink";
/// Push the installed dashboard version
pub const APP_GET_VERSION: &str = "app:getVersion";
/// Push the persisted identifier
pub const APP_GET_IDENTIFIER: &str = "app:getIdentifier";

/// Begin the log-out variant of the shutdown sequencer
pub const LOG_OUT: &str = "logOut";
/// Begin the uninstall variant of the shutdown sequencer
pub const UNINSTALL_LAUNCH: &str = "uninstall:launch";

/// Wallet status push (`{balance, address}`)
pub const WALLET_INFO: &str = "wallet:info";
/// Shutdown-began push
pub const APP_CLOSED: &str = "app:closed";
/// Installed dashboard version push
pub const APP_VERSION: &str = "app:version";
/// Persisted identifier push
pub const APP_IDENTIFIER: &str = "app:identifier";

/// The inbound channels a session registers when its surface is created.
pub const STARTUP_CHANNELS: &[&str] = &[
    NODE_LAUNCH,
    NODE_STOP,
    NODE_CHECK_VERSION,
    NODE_DOWNLOAD,
    BROWSER_LAUNCH,
    BROWSER_STATUS,
    BROWSER_CHECK_VERSION,
    BROWSER_DOWNLOAD,
    INSTALLER_CHECK_VERSION,
    WALLET_CHECK_BALANCE_AND_FUND,
    REFERRAL_NOTIFY,
    APP_CLOSE,
    APP_MINIMIZE,
    APP_OPEN_DOWNLOAD_LINK,
    APP_GET_VERSION,
    APP_GET_IDENTIFIER,
    LOG_OUT,
    UNINSTALL_LAUNCH,
];
