//! UI surface boundary

use async_trait::async_trait;

use crate::dialogs::{ConfirmPrompt, WarningNotice};
use crate::events::SurfaceEvent;

/// Abstraction over one visible application window and its message channel.
///
/// Implemented by the embedding desktop shell. Methods are called from
/// orchestrator tasks; implementations must be callable from any thread and
/// must tolerate calls after the surface has been destroyed (dropping the
/// event is acceptable).
#[async_trait]
pub trait UiSurface: Send + Sync {
    /// Push an event to the surface. Best-effort; delivery is not
    /// acknowledged.
    fn send(&self, event: SurfaceEvent);

    /// Present a blocking yes/no confirmation. Returns `true` when the
    /// user confirmed.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;

    /// Present a warning dialog.
    async fn alert(&self, notice: &WarningNotice);

    /// Minimize the surface.
    fn minimize(&self);

    /// Open a URL in the system browser. Failures are the surface's to log.
    fn open_external(&self, url: &str);

    /// Destroy the surface. After this call no further events are
    /// delivered.
    fn destroy(&self);
}
