//! Test builders — ergonomic constructors for `RawPurchaseRecord` and configs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use convsync_core::{Config, RawPurchaseRecord};
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawPurchaseRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new(90001)
///     .name("Jane", "Doe")
///     .email("jane@example.com")
///     .cell("(226) 600-1303")
///     .birth_date(1990, 5, 7)
///     .build();
/// ```
pub struct RecordBuilder {
    record: RawPurchaseRecord,
}

impl RecordBuilder {
    pub fn new(invoice_id: i64) -> Self {
        Self {
            record: RawPurchaseRecord {
                email: String::new(),
                cell_phone: String::new(),
                home_phone: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                zip: String::new(),
                birth_date: None,
                customer_id: 1,
                amount: Decimal::new(1000, 2),
                invoice_id,
                posted_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            },
        }
    }

    pub fn email(mut self, email: &str) -> Self {
        self.record.email = email.to_string();
        self
    }

    pub fn cell(mut self, phone: &str) -> Self {
        self.record.cell_phone = phone.to_string();
        self
    }

    pub fn home(mut self, phone: &str) -> Self {
        self.record.home_phone = phone.to_string();
        self
    }

    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.record.first_name = first.to_string();
        self.record.last_name = last.to_string();
        self
    }

    pub fn zip(mut self, zip: &str) -> Self {
        self.record.zip = zip.to_string();
        self
    }

    pub fn birth_date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.record.birth_date = Some(NaiveDate::from_ymd_opt(year, month, day).unwrap());
        self
    }

    pub fn customer(mut self, id: i64) -> Self {
        self.record.customer_id = id;
        self
    }

    /// Amount in cents.
    pub fn amount_cents(mut self, cents: i64) -> Self {
        self.record.amount = Decimal::new(cents, 2);
        self
    }

    pub fn posted_at(mut self, ts: DateTime<Utc>) -> Self {
        self.record.posted_at = ts;
        self
    }

    pub fn build(self) -> RawPurchaseRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A fully populated customer record.
pub fn jane_doe(invoice_id: i64) -> RawPurchaseRecord {
    RecordBuilder::new(invoice_id)
        .name("  Jane ", "Doe")
        .email(" Jane.Doe@Example.com ")
        .home("519.555.0100")
        .cell("(226) 600-1303")
        .zip("N2L 3G1")
        .birth_date(1990, 5, 7)
        .customer(4242)
        .amount_cents(4950)
        .build()
}

/// A walk-in record with no customer details at all.
pub fn walk_in(invoice_id: i64) -> RawPurchaseRecord {
    RecordBuilder::new(invoice_id).customer(0).build()
}

/// Config with every credential filled in, pointing the Graph API at
/// `base_url`.
pub fn test_config(base_url: &str) -> Config {
    Config::from_toml_str(&format!(
        r#"
        [graph]
        base_url = "{base_url}"
        access_token = "offline-token"
        conversion_token = "online-token"
        pixel_id = "px-100"
        offline_event_set_id = "oes-200"
        location = "kw01"

        [database]
        user = "reporter"
        password = "secret"
        address = "127.0.0.1:3306"
        name = "pos"
        "#
    ))
    .unwrap()
}
