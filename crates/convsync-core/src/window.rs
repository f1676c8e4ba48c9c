//! Query window — the single local calendar day a run reports.
//!
//! [`QueryWindow::compute`] takes "now" and a day offset, steps back that many
//! calendar days, truncates to local midnight and ends at the following local
//! midnight. The end is reached by adding one calendar day, not 24 hours, so
//! a daylight-saving day yields a 23- or 25-hour window.
//!
//! The store filter built from the window uses `BETWEEN`, which includes
//! both bounds: a row posted exactly at the next midnight belongs to two
//! consecutive windows.

use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone};

use crate::config::SourceConfig;
use crate::types::{PurchaseFilter, PurchaseKind};

/// Date-time literal format understood natively by the store.
pub const STORE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format used in offline upload tags.
pub const TAG_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl QueryWindow {
    /// Window for the local day `days_ago` days before `now`, in `now`'s zone.
    pub fn compute<Tz: TimeZone>(now: &DateTime<Tz>, days_ago: u32) -> Self {
        let tz = now.timezone();
        let day = now
            .date_naive()
            .checked_sub_days(Days::new(days_ago.into()))
            .unwrap_or(NaiveDate::MIN);
        let next = day.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);

        Self {
            start: local_midnight(&tz, day).fixed_offset(),
            end: local_midnight(&tz, next).fixed_offset(),
        }
    }

    /// Window relative to the host clock and zone.
    pub fn local(days_ago: u32) -> Self {
        Self::compute(&Local::now(), days_ago)
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Calendar date of the reported day, `YYYY-MM-DD`.
    pub fn tag_date(&self) -> String {
        self.start.format(TAG_DATE_FORMAT).to_string()
    }

    /// Whether `ts` falls inside the window, both bounds included.
    pub fn contains<Tz: TimeZone>(&self, ts: &DateTime<Tz>) -> bool {
        let ts = ts.fixed_offset();
        self.start <= ts && ts <= self.end
    }

    /// Store filter for one family over this window.
    pub fn filter(&self, kind: PurchaseKind, source: &SourceConfig) -> PurchaseFilter {
        PurchaseFilter {
            kind,
            type_code: source.type_code(kind).map(str::to_string),
            excluded_customer_id: source.excluded_customer_id,
            start: self.start.format(STORE_DATETIME_FORMAT).to_string(),
            end: self.end.format(STORE_DATETIME_FORMAT).to_string(),
        }
    }
}

/// First instant of `day` in `tz`. Where midnight falls in a DST gap, the
/// first valid instant after it.
fn local_midnight<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Tz> {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
