//! Core domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The child subsystems supervised by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsystemKind {
    /// Local network node process
    Node,
    /// Customized browser instance
    Browser,
    /// Installer routine
    Installer,
    /// Uninstaller routine
    Uninstaller,
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubsystemKind::Node => write!(f, "node"),
            SubsystemKind::Browser => write!(f, "browser"),
            SubsystemKind::Installer => write!(f, "installer"),
            SubsystemKind::Uninstaller => write!(f, "uninstaller"),
        }
    }
}

/// Lifecycle state of a supervised subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsystemState {
    /// Created but never launched
    Uninitialized,
    /// Launch completed
    Running,
    /// Stop issued, not yet resolved
    Stopping,
    /// Stop resolved
    Stopped,
}

impl fmt::Display for SubsystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubsystemState::Uninitialized => write!(f, "uninitialized"),
            SubsystemState::Running => write!(f, "running"),
            SubsystemState::Stopping => write!(f, "stopping"),
            SubsystemState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Which variant of the shutdown sequence is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownKind {
    /// Whole-application close
    Close,
    /// Explicit log-out (narrow node stop + identity wipe, then close)
    LogOut,
    /// Pre-uninstall close (launches the uninstaller before teardown)
    Uninstall,
}

impl fmt::Display for ShutdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownKind::Close => write!(f, "close"),
            ShutdownKind::LogOut => write!(f, "log-out"),
            ShutdownKind::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// Result of a shutdown attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// The sequence ran to completion and the surface was destroyed
    Completed,
    /// The user declined the confirmation; nothing was torn down
    Declined,
    /// Another shutdown sequence is already in flight
    AlreadyInProgress,
}
