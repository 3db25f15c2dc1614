//! Boundary trait definitions
//!
//! Everything the orchestrator consumes from the outside world crosses one
//! of these traits: the UI surface, the subsystem implementations, and the
//! collaborator services.

mod services;
mod subsystem;
mod surface;

pub use services::{FaucetService, IdentityStore, ReferralApi, VersionReader, WalletService};
pub use subsystem::Subsystem;
pub use surface::UiSurface;
