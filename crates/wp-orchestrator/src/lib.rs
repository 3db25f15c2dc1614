//! wp-orchestrator: Subsystem lifecycle orchestrator for the Waypoint dashboard
//!
//! The orchestrator supervises the dashboard's long-lived child subsystems
//! (node, browser, installer, uninstaller), dispatches named surface
//! messages to their handlers, sequences shutdown so that no subsystem is
//! abandoned mid-operation, and runs the bounded balance polling loop
//! against the faucet.
//!
//! The desktop shell embeds this crate: it supplies the [`wp_core::traits`]
//! implementations through [`Services`], creates an [`Orchestrator`], and
//! forwards surface messages into the live [`OrchestratorSession`].

pub mod app;
pub mod clients;
pub mod referral;
pub mod registry;
pub mod session;
pub mod shutdown;
pub mod subsystem;
pub mod wallet;

#[cfg(test)]
mod testkit;

pub use app::Orchestrator;
pub use session::{OrchestratorSession, Services};
