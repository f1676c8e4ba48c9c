//! convsync-upload — Graph API batch uploader for convsync.
//!
//! Upload is split in two steps. [`request`] builds an [`UploadRequest`]
//! from a batch of events: the URL, query string and form fields, with the
//! batch serialized to a JSON array under `data`. A [`BatchUploader`] then
//! performs exactly one POST and hands back the raw response body. The
//! status code and body are never inspected.

pub mod graph;
pub mod request;

pub use graph::{DryRunUploader, GraphUploader};
pub use request::{offline_request, online_request, UploadRequest};

use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to serialize event batch: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("upload request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("failed to read upload response: {0}")]
    Body(#[source] reqwest::Error),
}

/// Sends one built request and returns the unparsed response body.
pub trait BatchUploader: Send + Sync {
    fn post(
        &self,
        request: UploadRequest,
    ) -> impl Future<Output = Result<String, UploadError>> + Send;
}
