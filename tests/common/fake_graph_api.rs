//! Fake Graph API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `POST /{destination}/events`, records every request
//! (path, query string, form fields) and answers with
//! `{"events_received":N}` where `N` is the length of the posted `data`
//! array.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeGraphApi::start().await.unwrap();
//! let config = test_config(&api.base_url());
//! // ... run the pipeline ...
//! assert_eq!(api.posts().await.len(), 1);
//! ```

use axum::{
    extract::{Form, Path, Query, State},
    routing::post,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub destination: String,
    pub query: HashMap<String, String>,
    pub form: HashMap<String, String>,
}

impl RecordedPost {
    /// The posted `data` field parsed as JSON.
    pub fn data(&self) -> serde_json::Value {
        serde_json::from_str(self.form.get("data").expect("post has no data field"))
            .expect("data field is not JSON")
    }
}

type Posts = Arc<Mutex<Vec<RecordedPost>>>;

/// Handle to the running fake Graph API server.
pub struct FakeGraphApi {
    addr: SocketAddr,
    posts: Posts,
}

impl FakeGraphApi {
    /// Start the server on a random port. Returns once the server is
    /// listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let posts = Posts::default();

        let app = Router::new()
            .route("/{destination}/events", post(record_post))
            .with_state(posts.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, posts })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every request received so far, in arrival order.
    pub async fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().await.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn record_post(
    Path(destination): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    State(posts): State<Posts>,
    Form(form): Form<HashMap<String, String>>,
) -> String {
    let received = form
        .get("data")
        .and_then(|data| serde_json::from_str::<Vec<serde_json::Value>>(data).ok())
        .map(|events| events.len())
        .unwrap_or(0);

    posts.lock().await.push(RecordedPost {
        destination,
        query,
        form,
    });

    format!(r#"{{"events_received":{received}}}"#)
}
