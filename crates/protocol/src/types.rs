//! Core types shared across the protocol

use serde::{Deserialize, Serialize};

/// Reserved selector value meaning "no workflow".
pub const WORKFLOW_NONE: &str = "none";

/// Reserved selector value for an ad-hoc git-sourced workflow.
pub const WORKFLOW_CUSTOM: &str = "custom";

/// Lifecycle phase of a remote agentic session.
///
/// Owned and produced by the session service; clients only consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Pending,
    Creating,
    Running,
    Stopped,
    Completed,
    Failed,
    Error,
}

impl SessionPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionPhase::Running)
    }
}

/// A selectable workflow: a bundle of git-sourced agent instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Unique id. The reserved values `"none"` and `"custom"` never appear
    /// in a catalog.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub git_url: String,
    pub branch: String,
    /// Path inside the repository; empty means the repository root.
    #[serde(default)]
    pub path: String,
    /// Disabled workflows are visible but not selectable.
    pub enabled: bool,
}

impl WorkflowDefinition {
    /// Synthetic definition for an ad-hoc git-sourced workflow.
    ///
    /// `branch` falls back to `"main"` when empty.
    pub fn custom(git_url: &str, branch: &str, path: &str) -> Self {
        let branch = if branch.trim().is_empty() {
            "main"
        } else {
            branch
        };
        Self {
            id: WORKFLOW_CUSTOM.to_string(),
            name: "Custom workflow".to_string(),
            description: String::new(),
            git_url: git_url.to_string(),
            branch: branch.to_string(),
            path: path.to_string(),
            enabled: true,
        }
    }

    /// True for authoring placeholders that must never reach the UI.
    ///
    /// An entry is a placeholder when its name or id, trimmed and
    /// case-insensitively, contains the substring "template".
    pub fn is_template_entry(&self) -> bool {
        contains_template(&self.name) || contains_template(&self.id)
    }
}

fn contains_template(value: &str) -> bool {
    value.trim().to_ascii_lowercase().contains("template")
}

/// Git location triple persisted onto a session's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSource {
    pub git_url: String,
    pub branch: String,
    #[serde(default)]
    pub path: String,
}

impl From<&WorkflowDefinition> for WorkflowSource {
    fn from(def: &WorkflowDefinition) -> Self {
        Self {
            git_url: def.git_url.clone(),
            branch: def.branch.clone(),
            path: def.path.clone(),
        }
    }
}

/// Per-session workflow metadata returned by the session service.
///
/// The service may attach fields this client does not model; unknown fields
/// are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_workflow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<WorkflowSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition: Option<String>,
}

/// Error body returned by the session service on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str, name: &str) -> WorkflowDefinition {
        WorkflowDefinition {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            git_url: "https://example.com/wf.git".to_string(),
            branch: "main".to_string(),
            path: String::new(),
            enabled: true,
        }
    }

    #[test]
    fn template_filter_matches_name_and_id() {
        assert!(def("template-workflow", "Anything").is_template_entry());
        assert!(def("wf-1", "Template").is_template_entry());
        assert!(def("wf-1", "  My TEMPLATE thing  ").is_template_entry());
        assert!(!def("research", "Research").is_template_entry());
    }

    #[test]
    fn custom_defaults_branch_to_main() {
        let wf = WorkflowDefinition::custom("https://example.com/wf.git", "", "");
        assert_eq!(wf.id, WORKFLOW_CUSTOM);
        assert_eq!(wf.branch, "main");
        assert!(wf.enabled);

        let wf = WorkflowDefinition::custom("https://example.com/wf.git", "dev", "flows");
        assert_eq!(wf.branch, "dev");
        assert_eq!(wf.path, "flows");
    }

    #[test]
    fn workflow_definition_uses_camel_case_wire_names() {
        let json = serde_json::to_value(def("research", "Research")).unwrap();
        assert!(json.get("gitUrl").is_some());
        assert!(json.get("git_url").is_none());
    }

    #[test]
    fn session_phase_round_trips_as_pascal_case() {
        let phase: SessionPhase = serde_json::from_str("\"Running\"").unwrap();
        assert!(phase.is_running());
        assert_eq!(serde_json::to_string(&SessionPhase::Creating).unwrap(), "\"Creating\"");
    }
}
