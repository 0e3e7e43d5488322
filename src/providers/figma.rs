use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::http_client::build_client_with_timeout;
use super::scrub::{describe_failure, scrub_secret_patterns};
use super::traits::{BoxFuture, DocumentSource};
use crate::design::TreeNode;
use crate::error::{EvalError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1";

pub struct FigmaClient {
    token: Option<String>,
    api_base: String,
    pre_fetch_delay: Duration,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    #[serde(default)]
    document: Option<TreeNode>,
}

/// Pins a comment to a node.
#[derive(Debug, Clone, Serialize)]
pub struct CommentAnchor {
    pub node_id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_meta: Option<&'a CommentAnchor>,
}

impl FigmaClient {
    pub fn new(token: Option<&str>) -> Self {
        Self::with_base_url(token, None)
    }

    pub fn with_base_url(token: Option<&str>, api_base: Option<&str>) -> Self {
        Self {
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string),
            api_base: api_base
                .map_or(DEFAULT_API_BASE, |u| u.trim_end_matches('/'))
                .to_string(),
            pre_fetch_delay: Duration::ZERO,
            client: build_client_with_timeout(60),
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.client = build_client_with_timeout(timeout_secs);
        self
    }

    /// Pause before each document fetch to stay under the service's rate limit.
    pub fn with_pre_fetch_delay(mut self, delay: Duration) -> Self {
        self.pre_fetch_delay = delay;
        self
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn fetch(&self, file_key: &str) -> Result<TreeNode> {
        let token = self
            .token()
            .ok_or_else(|| EvalError::upstream(file_key, "Figma token not set. Set FIGMA_TOKEN."))?;

        if !self.pre_fetch_delay.is_zero() {
            tokio::time::sleep(self.pre_fetch_delay).await;
        }

        info!(file_key, "fetching design document");
        let url = format!("{}/files/{file_key}", self.api_base);
        let response = self
            .client
            .get(&url)
            .header("X-Figma-Token", token)
            .send()
            .await
            .map_err(|e| EvalError::upstream(file_key, scrub_secret_patterns(&e.to_string())))?;

        if !response.status().is_success() {
            return Err(EvalError::upstream(file_key, describe_failure(response).await));
        }

        let body: FileResponse = response
            .json()
            .await
            .map_err(|e| EvalError::upstream(file_key, format!("malformed payload: {e}")))?;

        body.document
            .ok_or_else(|| EvalError::upstream(file_key, "payload has no document root"))
    }

    /// Post one comment on `file_key`.
    pub async fn post_comment(
        &self,
        file_key: &str,
        message: &str,
        anchor: Option<&CommentAnchor>,
    ) -> anyhow::Result<()> {
        let token = self
            .token()
            .ok_or_else(|| anyhow::anyhow!("Figma token not set. Set FIGMA_TOKEN."))?;

        let url = format!("{}/files/{file_key}/comments", self.api_base);
        let response = self
            .client
            .post(&url)
            .header("X-Figma-Token", token)
            .json(&CommentRequest {
                message,
                client_meta: anchor,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Figma comment rejected ({})", describe_failure(response).await);
        }
        Ok(())
    }
}

impl DocumentSource for FigmaClient {
    fn name(&self) -> &str {
        "figma"
    }

    fn fetch_document<'a>(&'a self, file_key: &'a str) -> BoxFuture<'a, Result<TreeNode>> {
        Box::pin(self.fetch(file_key))
    }
}
