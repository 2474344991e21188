//! User-facing notifications
//!
//! One-shot, non-blocking channel from the coordinator to whatever surface
//! is presenting it. Fire-and-forget: failures to display are not observable
//! here.

use tracing::{debug, info, warn};

pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);

    /// Invoked once per successful live activation so dependent views can
    /// refresh.
    fn activated(&self);
}

/// Notifier that reports through the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(component = "notify", "{}", message);
    }

    fn error(&self, message: &str) {
        warn!(component = "notify", "{}", message);
    }

    fn activated(&self) {
        debug!(component = "notify", "workflow activation settled");
    }
}
