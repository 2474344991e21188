//! Workdeck Protocol
//!
//! Shared types for communication between the workdeck session service and
//! its clients. These types are serialized as JSON over HTTP.

// Re-exports
pub mod messages;
pub mod types;

pub use messages::SessionMessage;
pub use types::*;
