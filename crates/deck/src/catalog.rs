//! Workflow catalog
//!
//! Filtered, time-cached view of the workflows available to a workspace,
//! plus per-session workflow metadata. Fetch failures surface as-is; the
//! catalog never retries.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use workdeck_protocol::{WorkflowDefinition, WorkflowMetadata};

use crate::client::{ApiError, SessionApi};

/// Freshness window for the per-workspace workflow list.
pub const CATALOG_TTL: Duration = Duration::from_secs(5 * 60);

/// Freshness window for per-session workflow metadata.
pub const METADATA_TTL: Duration = Duration::from_secs(60);

struct Cached<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Cached<T> {
    fn fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

pub struct WorkflowCatalog<A> {
    api: A,
    catalog_ttl: Duration,
    metadata_ttl: Duration,
    workflows: DashMap<String, Cached<Vec<WorkflowDefinition>>>,
    metadata: DashMap<(String, String), Cached<WorkflowMetadata>>,
}

impl<A: SessionApi> WorkflowCatalog<A> {
    pub fn new(api: A) -> Self {
        Self::with_ttls(api, CATALOG_TTL, METADATA_TTL)
    }

    pub fn with_ttls(api: A, catalog_ttl: Duration, metadata_ttl: Duration) -> Self {
        Self {
            api,
            catalog_ttl,
            metadata_ttl,
            workflows: DashMap::new(),
            metadata: DashMap::new(),
        }
    }

    /// Workflows available to a workspace, template placeholders excluded,
    /// original order preserved. Cached per workspace id; an empty
    /// `workspace_id` disables the fetch entirely.
    pub async fn list_workflows(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<WorkflowDefinition>, ApiError> {
        if workspace_id.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(hit) = self.workflows.get(workspace_id) {
            if hit.fresh(self.catalog_ttl) {
                return Ok(hit.value.clone());
            }
        }

        let raw = self.api.list_workflows(workspace_id).await?;
        let filtered: Vec<WorkflowDefinition> = raw
            .into_iter()
            .filter(|wf| !wf.is_template_entry())
            .collect();

        debug!(
            workspace = %workspace_id,
            count = filtered.len(),
            "workflow catalog refreshed"
        );

        self.workflows.insert(
            workspace_id.to_string(),
            Cached {
                value: filtered.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(filtered)
    }

    /// Workflow metadata for one session, cached per (workspace, session).
    ///
    /// Callers gate this on readiness of prerequisite data via `enabled`;
    /// when disabled, or when either id is missing, no fetch is issued and
    /// `None` is returned.
    pub async fn session_metadata(
        &self,
        workspace_id: &str,
        session_id: &str,
        enabled: bool,
    ) -> Result<Option<WorkflowMetadata>, ApiError> {
        if !enabled || workspace_id.is_empty() || session_id.is_empty() {
            return Ok(None);
        }

        let key = (workspace_id.to_string(), session_id.to_string());
        if let Some(hit) = self.metadata.get(&key) {
            if hit.fresh(self.metadata_ttl) {
                return Ok(Some(hit.value.clone()));
            }
        }

        let meta = self
            .api
            .session_workflow_metadata(workspace_id, session_id)
            .await?;
        self.metadata.insert(
            key,
            Cached {
                value: meta.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(Some(meta))
    }
}
