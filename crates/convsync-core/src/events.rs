//! Event builder — maps a [`RawPurchaseRecord`] onto one of the two Graph API
//! event shapes.
//!
//! ```text
//! RawPurchaseRecord ──► normalizer ──┬──► OfflinePurchaseEvent  (offline event set upload)
//!                                    └──► OnlineConversionEvent (pixel conversion upload)
//! ```
//!
//! Both builders are pure: the same record always yields byte-identical JSON.
//! The only values not taken from the record are the business constants
//! below and the configured currency.
//!
//! The two shapes differ in more than field names:
//!
//! | | offline | online |
//! |---|---|---|
//! | birth date | three digests: year, month, day | one digest of `YYYY-DD-MM` |
//! | country | digest of `ca` | empty |
//! | external id | integer | decimal string |
//! | phone `+` prefix | never | when `online_phone_plus` is set |

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Config;
use crate::normalizer::{digest, email_list, normalize_zip, phone_list, text_digest};
use crate::types::RawPurchaseRecord;

/// Event name reported for every purchase.
pub const EVENT_NAME: &str = "Purchase";

/// Action source reported for web conversions.
pub const ACTION_SOURCE: &str = "website";

/// Region code hashed into every offline match-key set, whatever the
/// customer's address.
pub const COUNTRY_CODE: &str = "ca";

/// `strftime` pattern for the single online birthday digest. Day comes
/// before month.
pub const ONLINE_BIRTHDAY_FORMAT: &str = "%Y-%d-%m";

// ---------------------------------------------------------------------------
// Offline shape
// ---------------------------------------------------------------------------

/// Identity bundle for an offline purchase. Every field except
/// `external_id` is a digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchKeys {
    pub phone: Vec<String>,
    pub email: Vec<String>,
    #[serde(rename = "fn")]
    pub first_name: String,
    #[serde(rename = "ln")]
    pub last_name: String,
    pub country: String,
    /// Plaintext customer id.
    #[serde(rename = "extern_id")]
    pub external_id: i64,
    #[serde(rename = "doby")]
    pub birth_year: String,
    #[serde(rename = "dobm")]
    pub birth_month: String,
    #[serde(rename = "dobd")]
    pub birth_day: String,
    pub zip: String,
}

/// One in-store purchase as the offline event set upload expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfflinePurchaseEvent {
    pub match_keys: MatchKeys,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub event_name: &'static str,
    pub order_id: i64,
    /// Unix seconds.
    pub event_time: i64,
}

// ---------------------------------------------------------------------------
// Online shape
// ---------------------------------------------------------------------------

/// Customer identity for a web conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    #[serde(rename = "em")]
    pub email: Vec<String>,
    #[serde(rename = "ph")]
    pub phone: Vec<String>,
    #[serde(rename = "fn")]
    pub first_name: String,
    #[serde(rename = "ln")]
    pub last_name: String,
    #[serde(rename = "db")]
    pub birthday: String,
    #[serde(rename = "zp")]
    pub zip: String,
    /// Never populated; serialized as an empty string.
    pub country: String,
    /// Plaintext customer id as a decimal string.
    pub external_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomData {
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

/// One web purchase as the pixel conversion endpoint expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnlineConversionEvent {
    pub event_name: &'static str,
    /// Unix seconds.
    pub event_time: i64,
    pub action_source: &'static str,
    pub user_data: UserData,
    pub custom_data: CustomData,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Shared settings for both event families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBuilder {
    currency: String,
    online_phone_plus: bool,
}

impl EventBuilder {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            online_phone_plus: false,
        }
    }

    /// Prefix 11-digit online phone numbers with `+` before hashing.
    pub fn online_phone_plus(mut self, enabled: bool) -> Self {
        self.online_phone_plus = enabled;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.run.currency.clone()).online_phone_plus(config.run.online_phone_plus)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn build_offline(&self, record: &RawPurchaseRecord) -> OfflinePurchaseEvent {
        let birth = birth_date_or_zero(record.birth_date);

        OfflinePurchaseEvent {
            match_keys: MatchKeys {
                phone: phone_list(&record.home_phone, &record.cell_phone, false),
                email: email_list(&record.email),
                first_name: text_digest(&record.first_name),
                last_name: text_digest(&record.last_name),
                country: digest(COUNTRY_CODE),
                external_id: record.customer_id,
                birth_year: digest(&birth.year().to_string()),
                birth_month: digest(&format!("{:02}", birth.month())),
                birth_day: digest(&format!("{:02}", birth.day())),
                zip: normalize_zip(&record.zip),
            },
            currency: self.currency.clone(),
            value: record.amount,
            event_name: EVENT_NAME,
            order_id: record.invoice_id,
            event_time: record.posted_at.timestamp(),
        }
    }

    pub fn build_online(&self, record: &RawPurchaseRecord) -> OnlineConversionEvent {
        let birth = birth_date_or_zero(record.birth_date);

        OnlineConversionEvent {
            event_name: EVENT_NAME,
            event_time: record.posted_at.timestamp(),
            action_source: ACTION_SOURCE,
            user_data: UserData {
                email: email_list(&record.email),
                phone: phone_list(&record.home_phone, &record.cell_phone, self.online_phone_plus),
                first_name: text_digest(&record.first_name),
                last_name: text_digest(&record.last_name),
                birthday: digest(&birth.format(ONLINE_BIRTHDAY_FORMAT).to_string()),
                zip: normalize_zip(&record.zip),
                country: String::new(),
                external_id: record.customer_id.to_string(),
            },
            custom_data: CustomData {
                currency: self.currency.clone(),
                value: record.amount,
            },
        }
    }
}

/// A NULL birth date hashes as 0001-01-01.
fn birth_date_or_zero(date: Option<NaiveDate>) -> NaiveDate {
    date.or_else(|| NaiveDate::from_ymd_opt(1, 1, 1))
        .unwrap_or(NaiveDate::MIN)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
