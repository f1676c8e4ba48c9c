//! Pipeline: one fetch, one transform, one upload per event family.
//!
//! ```text
//! QueryWindow ──► RecordSource::fetch ──► EventBuilder ──► upload request ──► BatchUploader::post
//! ```
//!
//! The whole row stream is drained before anything is posted, so a source
//! error mid-stream aborts the family with nothing uploaded. An empty day
//! still posts once, with `data = []`.

use convsync_core::{
    Config, ConfigError, EventBuilder, PurchaseKind, QueryWindow, RawPurchaseRecord,
};
use convsync_source::{RecordSource, SourceError};
use convsync_upload::{offline_request, online_request, BatchUploader, UploadError};
use futures::TryStreamExt;

/// Which stage a run failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Config,
    Source,
    Transport,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{kind} run aborted: {source}")]
    Source {
        kind: PurchaseKind,
        #[source]
        source: SourceError,
    },
    #[error("{kind} upload failed: {source}")]
    Upload {
        kind: PurchaseKind,
        #[source]
        source: UploadError,
    },
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::Config(_) => FailureKind::Config,
            PipelineError::Source { .. } => FailureKind::Source,
            PipelineError::Upload { .. } => FailureKind::Transport,
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            FailureKind::Config => 2,
            FailureKind::Source => 3,
            FailureKind::Transport => 4,
        }
    }
}

/// Outcome of one family's run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub kind: PurchaseKind,
    pub events: usize,
    /// Raw upload response body.
    pub response: String,
}

/// Fetch, transform and upload one family for `window`.
pub async fn run_family<S, U>(
    config: &Config,
    kind: PurchaseKind,
    window: &QueryWindow,
    source: &S,
    uploader: &U,
) -> Result<RunReport, PipelineError>
where
    S: RecordSource + ?Sized,
    U: BatchUploader,
{
    let filter = window.filter(kind, &config.source);
    let records: Vec<RawPurchaseRecord> = source
        .fetch(&filter)
        .try_collect()
        .await
        .map_err(|source| PipelineError::Source { kind, source })?;
    tracing::info!(%kind, rows = records.len(), "fetched purchases");

    let builder = EventBuilder::from_config(config);
    let upload_err = |source| PipelineError::Upload { kind, source };
    let request = match kind {
        PurchaseKind::Offline => {
            let events: Vec<_> = records.iter().map(|r| builder.build_offline(r)).collect();
            offline_request(&config.graph, &events, window).map_err(upload_err)?
        }
        PurchaseKind::Online => {
            let events: Vec<_> = records.iter().map(|r| builder.build_online(r)).collect();
            online_request(&config.graph, &events).map_err(upload_err)?
        }
    };

    let response = uploader.post(request).await.map_err(upload_err)?;
    Ok(RunReport {
        kind,
        events: records.len(),
        response,
    })
}

/// Run each family in order over the same window, stopping at the first
/// failure.
///
/// `on_report` sees each family's report as soon as its upload returns, so a
/// later failure never hides a batch that was already posted.
pub async fn run<S, U, F>(
    config: &Config,
    kinds: &[PurchaseKind],
    window: &QueryWindow,
    source: &S,
    uploader: &U,
    mut on_report: F,
) -> Result<Vec<RunReport>, PipelineError>
where
    S: RecordSource + ?Sized,
    U: BatchUploader,
    F: FnMut(&RunReport),
{
    tracing::info!(
        start = %window.start(),
        end = %window.end(),
        families = kinds.len(),
        "starting run"
    );
    let mut reports = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let report = run_family(config, kind, window, source, uploader).await?;
        on_report(&report);
        reports.push(report);
    }
    Ok(reports)
}
