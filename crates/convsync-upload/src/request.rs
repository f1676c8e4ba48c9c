//! Request shapes for the two upload endpoints.
//!
//! | family  | URL                                   | auth                        | extra form fields |
//! |---------|---------------------------------------|-----------------------------|-------------------|
//! | offline | `{base}/{offline_event_set_id}/events` | `access_token` form field   | `upload_tag`      |
//! | online  | `{base}/{pixel_id}/events`             | `access_token` query string | none              |

use convsync_core::config::GraphConfig;
use convsync_core::{OfflinePurchaseEvent, OnlineConversionEvent, QueryWindow};
use serde::Serialize;

use crate::UploadError;

/// A fully built, not yet sent, upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub form: Vec<(&'static str, String)>,
}

impl UploadRequest {
    /// The serialized event batch.
    pub fn data(&self) -> Option<&str> {
        self.form_field("data")
    }

    pub fn form_field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

// Tokens live in `query`/`form`; keep them out of logs.
impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = |fields: &[(&'static str, String)]| -> Vec<&'static str> {
            fields.iter().map(|(key, _)| *key).collect()
        };
        f.debug_struct("UploadRequest")
            .field("url", &self.url)
            .field("query", &names(&self.query))
            .field("form", &names(&self.form))
            .finish()
    }
}

pub fn offline_request(
    graph: &GraphConfig,
    events: &[OfflinePurchaseEvent],
    window: &QueryWindow,
) -> Result<UploadRequest, UploadError> {
    Ok(UploadRequest {
        url: events_url(graph, &graph.offline_event_set_id),
        query: Vec::new(),
        form: vec![
            ("access_token", graph.access_token.clone()),
            ("upload_tag", graph.upload_tag(&window.tag_date())),
            ("data", to_json_array(events)?),
        ],
    })
}

pub fn online_request(
    graph: &GraphConfig,
    events: &[OnlineConversionEvent],
) -> Result<UploadRequest, UploadError> {
    Ok(UploadRequest {
        url: events_url(graph, &graph.pixel_id),
        query: vec![("access_token", graph.conversion_token.clone())],
        form: vec![("data", to_json_array(events)?)],
    })
}

fn events_url(graph: &GraphConfig, destination: &str) -> String {
    format!("{}/{}/events", graph.base_url.trim_end_matches('/'), destination)
}

fn to_json_array<T: Serialize>(events: &[T]) -> Result<String, UploadError> {
    Ok(serde_json::to_string(events)?)
}
