//! Session service HTTP client
//!
//! Thin typed wrapper over the four collaborator endpoints. No retries here;
//! retry policy belongs to the caller.

use async_trait::async_trait;
use thiserror::Error;

use workdeck_protocol::{
    ErrorBody, SessionMessage, WorkflowDefinition, WorkflowMetadata, WorkflowSource,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// Server-reported error message, or a generic fallback when the
    /// response carried no usable `error` field.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => "Failed to activate workflow".to_string(),
        }
    }
}

/// Remote operations the catalog and coordinator depend on.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Raw (unfiltered) workflow catalog for a workspace.
    async fn list_workflows(&self, workspace: &str) -> Result<Vec<WorkflowDefinition>, ApiError>;

    /// Workflow metadata for one session.
    async fn session_workflow_metadata(
        &self,
        workspace: &str,
        session: &str,
    ) -> Result<WorkflowMetadata, ApiError>;

    /// Persist a workflow source onto the session's configuration.
    async fn update_workflow_config(
        &self,
        workspace: &str,
        session: &str,
        source: &WorkflowSource,
    ) -> Result<(), ApiError>;

    /// Post a message onto the session's live message channel.
    async fn send_session_message(
        &self,
        workspace: &str,
        session: &str,
        message: &SessionMessage,
    ) -> Result<(), ApiError>;
}

/// `reqwest`-backed session service client.
#[derive(Clone)]
pub struct HttpSessionApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpSessionApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to `ApiError::Api`, pulling the message from
    /// the `{error}` body when present.
    async fn error_from(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let message = resp
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_default();
        ApiError::Api { status, message }
    }

    async fn expect_ok(resp: reqwest::Response) -> Result<(), ApiError> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(resp).await)
        }
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn list_workflows(&self, workspace: &str) -> Result<Vec<WorkflowDefinition>, ApiError> {
        let url = self.url(&format!("/api/workspaces/{workspace}/workflows"));
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn session_workflow_metadata(
        &self,
        workspace: &str,
        session: &str,
    ) -> Result<WorkflowMetadata, ApiError> {
        let url = self.url(&format!(
            "/api/workspaces/{workspace}/sessions/{session}/workflow"
        ));
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn update_workflow_config(
        &self,
        workspace: &str,
        session: &str,
        source: &WorkflowSource,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!(
            "/api/workspaces/{workspace}/sessions/{session}/workflow"
        ));
        let resp = self.http.post(&url).json(source).send().await?;
        Self::expect_ok(resp).await
    }

    async fn send_session_message(
        &self,
        workspace: &str,
        session: &str,
        message: &SessionMessage,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!(
            "/api/workspaces/{workspace}/sessions/{session}/messages"
        ));
        let resp = self.http.post(&url).json(message).send().await?;
        Self::expect_ok(resp).await
    }
}
