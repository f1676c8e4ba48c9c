//! convsync-core — shared types and the record-to-event transformation.
//!
//! This crate holds everything that decides what gets uploaded; the source
//! and upload crates only move bytes.
//!
//! # Architecture
//!
//! ```text
//! QueryWindow ──► RecordSource ──► normalizer ──► EventBuilder ──► BatchUploader
//!  (window)      (convsync-source)  (normalizer)    (events)      (convsync-upload)
//! ```
//!
//! Every run reports one local calendar day for one or both event families,
//! strictly in sequence.

pub mod config;
pub mod events;
pub mod normalizer;
pub mod types;
pub mod window;

pub use config::{Config, ConfigError};
pub use events::{EventBuilder, OfflinePurchaseEvent, OnlineConversionEvent};
pub use types::{PurchaseFilter, PurchaseKind, RawPurchaseRecord};
pub use window::QueryWindow;
