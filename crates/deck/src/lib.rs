//! Workdeck
//!
//! Client-side core for workflow activation on agentic sessions: a filtered,
//! time-cached catalog of git-sourced workflows, and a per-session
//! coordinator that commits a selection onto the remote session resource in
//! two phases (config update, then restart notification).

pub mod activation;
pub mod catalog;
pub mod client;
pub mod logging;
pub mod notify;

pub use activation::{ActivationCoordinator, ActivationState, Selection};
pub use catalog::WorkflowCatalog;
pub use client::{ApiError, HttpSessionApi, SessionApi};
pub use notify::{LogNotifier, Notifier};
