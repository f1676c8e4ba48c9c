//! Core types for convsync-core.
//!
//! This module defines the data structures shared across all pipeline
//! layers: the raw [`RawPurchaseRecord`] read from the point-of-sale store,
//! the [`PurchaseKind`] discriminant that selects an event family, and the
//! [`PurchaseFilter`] handed to record sources.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// One invoice row joined with its customer, as read from the store.
///
/// Customer columns come from a left join, so every text field may be empty.
/// Nothing here is validated; the normalizer hashes whatever it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPurchaseRecord {
    pub email: String,
    /// Free-format cell phone number (`(226) 600-1303`, `226.600.1303`, …).
    pub cell_phone: String,
    /// Free-format home phone number.
    pub home_phone: String,
    pub first_name: String,
    pub last_name: String,
    /// Postal or zip code, spaces and case as entered.
    pub zip: String,
    /// Customer birth date. `None` when the column is NULL.
    pub birth_date: Option<NaiveDate>,
    pub customer_id: i64,
    /// Invoice total, passed through unrounded.
    pub amount: Decimal,
    pub invoice_id: i64,
    /// Posting timestamp of the invoice.
    pub posted_at: DateTime<Utc>,
}

/// Which event family a run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseKind {
    /// In-store point-of-sale purchases, uploaded as an offline event set.
    Offline,
    /// Web storefront purchases, uploaded through the pixel conversion API.
    Online,
}

impl PurchaseKind {
    /// Both families in the order a full run reports them.
    pub const ALL: [PurchaseKind; 2] = [PurchaseKind::Offline, PurchaseKind::Online];
}

impl std::fmt::Display for PurchaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseKind::Offline => write!(f, "offline"),
            PurchaseKind::Online => write!(f, "online"),
        }
    }
}

/// Server-side filter for one family and one query window.
///
/// `start` and `end` are local date-time literals in the store's native
/// `YYYY-MM-DD HH:MM:SS` form and are both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseFilter {
    pub kind: PurchaseKind,
    /// Invoice type code to match, or `None` to accept every type.
    pub type_code: Option<String>,
    pub excluded_customer_id: i64,
    pub start: String,
    pub end: String,
}
