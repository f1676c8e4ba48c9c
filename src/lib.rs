//! convsync — conversion sync.
//!
//! Reads one day of point-of-sale and web purchases, hashes customer
//! identifiers into match keys and uploads the resulting conversion events
//! to the Graph API. The layers live in their own crates; this crate wires
//! them into a [`pipeline`] so the binary and integration tests share one
//! entry point.
//!
//! # Architecture
//!
//! ```text
//! QueryWindow ──► RecordSource ──► Normalizer ──► EventBuilder ──► BatchUploader
//!                  (MySQL)                                          (Graph API)
//! ```
//!
//! Runs are single-threaded and sequential: offline first, then online.

pub mod pipeline;

pub use convsync_core::{Config, PurchaseKind, QueryWindow};
pub use pipeline::{run, run_family, FailureKind, PipelineError, RunReport};
