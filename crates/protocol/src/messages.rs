//! Client → session messages
//!
//! Posted onto a session's live message channel. The session process reacts
//! to these while it is running.

use serde::{Deserialize, Serialize};

/// Messages sent from a client to a running session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionMessage {
    /// Instructs the session process to re-clone the workflow source and
    /// restart its agent.
    #[serde(rename_all = "camelCase")]
    WorkflowChange {
        git_url: String,
        branch: String,
        path: String,
    },
}

impl SessionMessage {
    pub fn workflow_change(source: &crate::types::WorkflowSource) -> Self {
        SessionMessage::WorkflowChange {
            git_url: source.git_url.clone(),
            branch: source.branch.clone(),
            path: source.path.clone(),
        }
    }
}
