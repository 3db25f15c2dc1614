//! Subsystem boundary

use async_trait::async_trait;

use crate::error::SubsystemError;
use crate::types::SubsystemKind;

/// A child subsystem supervised by the orchestrator.
///
/// Implementations own the actual process management (spawning the node,
/// driving the browser, running the installer binaries). The orchestrator
/// only sequences lifecycle calls and reacts to reported status.
#[async_trait]
pub trait Subsystem: Send + Sync {
    /// Which subsystem this is
    fn kind(&self) -> SubsystemKind;

    /// Begin the subsystem's startup sequence.
    async fn launch(&self) -> Result<(), SubsystemError>;

    /// Stop the subsystem.
    ///
    /// Must resolve for "already stopped"; an error means genuine I/O
    /// failure, not a redundant call.
    async fn stop(&self) -> Result<(), SubsystemError>;

    /// Check for a newer version. Results are pushed to the UI surface by
    /// the implementation; there is no synchronous return path.
    async fn check_version(&self) -> Result<(), SubsystemError> {
        Err(SubsystemError::Unsupported {
            kind: self.kind(),
            operation: "check_version",
        })
    }

    /// Download an update. Same push-only result contract as
    /// `check_version`.
    async fn download(&self) -> Result<(), SubsystemError> {
        Err(SubsystemError::Unsupported {
            kind: self.kind(),
            operation: "download",
        })
    }
}
