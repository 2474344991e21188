//! Workflow activation state machine
//!
//! Mediates a user's workflow selection into a confirmed remote activation:
//! `Idle -> Pending -> Activating -> Active`, with a `Queued` sub-branch of
//! `Activating` when the session is not yet Running. One coordinator per
//! session view; the remote session resource stays the source of truth for
//! the active workflow across reloads.

use std::time::Duration;

use tracing::{debug, info, warn};

use workdeck_protocol::{
    SessionMessage, SessionPhase, WorkflowDefinition, WorkflowSource, WORKFLOW_CUSTOM,
    WORKFLOW_NONE,
};

use crate::client::SessionApi;
use crate::notify::Notifier;

/// Settle time after a successful activation: the session process needs a
/// moment to clone the workflow source and restart its agent before the UI
/// can assume readiness. A flat delay, not a poll; the restart itself is not
/// verified.
pub const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Outcome of a selector change.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No workflow resolved (deselection or a rejected selection).
    None,
    /// The caller routes this to the external custom-workflow entry flow.
    Custom,
    /// A catalog workflow is now pending activation.
    Workflow(WorkflowDefinition),
}

/// Mutable activation state for one session, owned by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationState {
    /// Value currently shown in the selector UI.
    pub selected_workflow_id: String,
    /// Chosen but not yet committed.
    pub pending_workflow: Option<WorkflowDefinition>,
    /// Activation requested while the session was not Running; replayed once
    /// it is. At most one; a later request overwrites it.
    pub queued_workflow: Option<WorkflowDefinition>,
    /// Id of the workflow confirmed active on the remote session.
    pub active_workflow: Option<String>,
    /// True for the duration of an in-flight activation, including the
    /// queued case and the post-restart settle delay.
    pub activating: bool,
}

impl Default for ActivationState {
    fn default() -> Self {
        Self {
            selected_workflow_id: WORKFLOW_NONE.to_string(),
            pending_workflow: None,
            queued_workflow: None,
            active_workflow: None,
            activating: false,
        }
    }
}

pub struct ActivationCoordinator<A, N> {
    workspace: String,
    session: String,
    api: A,
    notifier: N,
    state: ActivationState,
    last_phase: Option<SessionPhase>,
    settle_delay: Duration,
}

impl<A: SessionApi, N: Notifier> ActivationCoordinator<A, N> {
    pub fn new(workspace: &str, session: &str, api: A, notifier: N) -> Self {
        Self {
            workspace: workspace.to_string(),
            session: session.to_string(),
            api,
            notifier,
            state: ActivationState::default(),
            last_phase: None,
            settle_delay: SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn state(&self) -> &ActivationState {
        &self.state
    }

    pub fn last_phase(&self) -> Option<SessionPhase> {
        self.last_phase
    }

    /// Resolve a raw selector value against the catalog.
    ///
    /// `"none"` deselects. `"custom"` defers to the external entry flow and
    /// changes nothing here. A catalog id becomes the pending workflow when
    /// it resolves to an enabled entry; otherwise the state is left
    /// unchanged and the error goes to the notifier.
    pub fn select_workflow(
        &mut self,
        value: &str,
        catalog: &[WorkflowDefinition],
    ) -> Selection {
        if value == WORKFLOW_NONE {
            self.state.pending_workflow = None;
            self.state.selected_workflow_id = WORKFLOW_NONE.to_string();
            return Selection::None;
        }

        if value == WORKFLOW_CUSTOM {
            return Selection::Custom;
        }

        let Some(def) = catalog.iter().find(|wf| wf.id == value) else {
            self.notifier.error("Workflow not found");
            return Selection::None;
        };

        if !def.enabled {
            self.notifier.error("Workflow not yet available");
            return Selection::None;
        }

        self.state.pending_workflow = Some(def.clone());
        self.state.selected_workflow_id = def.id.clone();
        Selection::Workflow(def.clone())
    }

    /// Stage an ad-hoc git-sourced workflow as the pending selection.
    pub fn set_custom_workflow(&mut self, git_url: &str, branch: &str, path: &str) {
        let def = WorkflowDefinition::custom(git_url, branch, path);
        self.state.selected_workflow_id = WORKFLOW_CUSTOM.to_string();
        self.state.pending_workflow = Some(def);
    }

    /// Record the latest observed session phase. When the session enters
    /// Running with a workflow queued, the queued activation is replayed.
    pub async fn observe_phase(&mut self, phase: SessionPhase) {
        let was_running = self.last_phase.is_some_and(|p| p.is_running());
        self.last_phase = Some(phase);

        if phase.is_running() && !was_running {
            if let Some(queued) = self.state.queued_workflow.take() {
                info!(
                    session = %self.session,
                    workflow = %queued.id,
                    "session running, replaying queued workflow"
                );
                self.activate_workflow(Some(queued), Some(phase)).await;
            }
        }
    }

    /// Activate a workflow on the remote session.
    ///
    /// Target is the explicit argument if given, else the pending selection;
    /// with neither this is a silent no-op returning `false`. When the
    /// session is not Running (or its phase is not yet known) the target is
    /// queued and `true` is returned without any remote call. Otherwise the
    /// two-phase commit runs: config update, then restart notification over
    /// the message channel; failures are reported through the notifier and
    /// never retried here.
    pub async fn activate_workflow(
        &mut self,
        explicit: Option<WorkflowDefinition>,
        phase: Option<SessionPhase>,
    ) -> bool {
        let Some(target) = explicit.or_else(|| self.state.pending_workflow.clone()) else {
            return false;
        };
        let phase = phase.or(self.last_phase);

        if !matches!(phase, Some(p) if p.is_running()) {
            debug!(
                session = %self.session,
                workflow = %target.id,
                phase = ?phase,
                "session not running, queueing workflow"
            );
            self.state.selected_workflow_id = target.id.clone();
            self.state.queued_workflow = Some(target);
            self.state.activating = true;
            return true;
        }

        self.state.activating = true;
        let ok = self.activate_live(&target).await;
        self.state.activating = false;
        ok
    }

    async fn activate_live(&mut self, target: &WorkflowDefinition) -> bool {
        let source = WorkflowSource::from(target);

        // Strict sequence: the config must be persisted before the session
        // is told to restart onto it. A message-channel failure lands in the
        // same error path as a config failure.
        let committed = async {
            self.api
                .update_workflow_config(&self.workspace, &self.session, &source)
                .await?;
            self.api
                .send_session_message(
                    &self.workspace,
                    &self.session,
                    &SessionMessage::workflow_change(&source),
                )
                .await
        }
        .await;

        match committed {
            Ok(()) => {
                self.state.active_workflow = Some(target.id.clone());
                self.state.selected_workflow_id = target.id.clone();
                self.state.pending_workflow = None;
                self.state.queued_workflow = None;

                tokio::time::sleep(self.settle_delay).await;

                info!(
                    session = %self.session,
                    workflow = %target.id,
                    "workflow activated"
                );
                self.notifier.activated();
                self.notifier
                    .success(&format!("Workflow {} activated", target.name));
                true
            }
            Err(err) => {
                warn!(
                    session = %self.session,
                    workflow = %target.id,
                    error = %err,
                    "workflow activation failed"
                );
                self.state.queued_workflow = None;
                self.notifier.error(&err.user_message());
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
