//! Dialog descriptors shown by the UI surface
//!
//! The orchestrator never renders anything itself; it hands these
//! descriptors to the surface and reacts to the answer.

/// A blocking yes/no confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

/// A non-interactive warning dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningNotice {
    pub title: &'static str,
    pub message: &'static str,
}

/// Shown before the whole-application close when the browser is running
pub const CLOSE_CONFIRMATION: ConfirmPrompt = ConfirmPrompt {
    title: "Are you sure you want to close?",
    message: "Quit Waypoint Network and Waypoint Browser?",
    confirm_label: "Yes",
    cancel_label: "No",
};

/// Shown before log-out
pub const LOGOUT_CONFIRMATION: ConfirmPrompt = ConfirmPrompt {
    title: "Are you sure you want to log out?",
    message: "Do you want to close the browser and remove the secret phrase from this computer?",
    confirm_label: "Yes",
    cancel_label: "No",
};

/// Shown before uninstall
pub const UNINSTALL_CONFIRMATION: ConfirmPrompt = ConfirmPrompt {
    title: "Uninstall Waypoint Network",
    message: "Are you sure you want to uninstall Waypoint Network? Clicking Yes will also close \
              the Waypoint Dashboard and Waypoint Browser.",
    confirm_label: "Yes",
    cancel_label: "No",
};

/// Raised on send-buffer exhaustion
pub const NO_INTERNET_WARNING: WarningNotice = WarningNotice {
    title: "Connection Error",
    message: "Please check your internet connection",
};

/// Raised on connection timeout
pub const TIMEOUT_WARNING: WarningNotice = WarningNotice {
    title: "Timeout Error",
    message: "Please check your internet connection or restart Waypoint",
};

/// Map a fatal process-level error to the warning dialog it should raise.
///
/// Only two network-failure classes surface as modal warnings: send-buffer
/// exhaustion and connection timeout. Everything else is log-only and maps
/// to `None`.
pub fn warning_for_error(error: &str) -> Option<&'static WarningNotice> {
    if error.contains("ENOBUFS") || error.contains("No buffer space") {
        Some(&NO_INTERNET_WARNING)
    } else if error.contains("ETIMEDOUT") || error.contains("timed out") {
        Some(&TIMEOUT_WARNING)
    } else {
        None
    }
}
