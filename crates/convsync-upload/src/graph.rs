//! Uploaders: the real Graph API client and a dry-run stand-in.

use crate::{BatchUploader, UploadError, UploadRequest};

/// Posts form-encoded requests with `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct GraphUploader {
    client: reqwest::Client,
}

impl GraphUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl BatchUploader for GraphUploader {
    async fn post(&self, request: UploadRequest) -> Result<String, UploadError> {
        let response = self
            .client
            .post(&request.url)
            .query(&request.query)
            .form(&request.form)
            .send()
            .await
            .map_err(UploadError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(UploadError::Body)?;
        tracing::info!(url = %request.url, %status, bytes = body.len(), "upload posted");
        Ok(body)
    }
}

/// Sends nothing; the "response" is the `data` field that would have been
/// posted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunUploader;

impl BatchUploader for DryRunUploader {
    async fn post(&self, request: UploadRequest) -> Result<String, UploadError> {
        tracing::info!(url = %request.url, "dry run, skipping upload");
        Ok(request.data().unwrap_or("[]").to_string())
    }
}
