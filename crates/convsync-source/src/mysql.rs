//! MySQL source — reads invoices joined with customers from the point-of-sale
//! database.
//!
//! All filters run server-side with bound parameters:
//!
//! - voided invoices are skipped
//! - the configured house-account customer is skipped
//! - only positive amounts
//! - `invtype` must equal the family's type code, unless the code is empty
//! - `postdate BETWEEN start AND end`, both bounds included
//!
//! Customer columns come from a left join and may be NULL. NULL text decodes
//! to an empty string and a NULL customer id to `0`. `bday` is selected as
//! text so that zero and partial dates (`0000-00-00`, `1990-05-00`) reach us
//! intact; anything that is not a real calendar date becomes "no birth
//! date". `postdate` is a zone-less `DATETIME` and is read as UTC.

use chrono::{NaiveDate, NaiveDateTime};
use convsync_core::config::DatabaseConfig;
use convsync_core::{ConfigError, PurchaseFilter, RawPurchaseRecord};
use futures::StreamExt;
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::{RecordSource, RecordStream, SourceError};

const PURCHASE_QUERY: &str = r#"
select
    customers.email,
    customers.cell_phone,
    customers.home_phone,
    customers.firstname,
    customers.lastname,
    customers.zip,
    cast(customers.bday as char) as bday,
    customers.customer_id,
    invoices.amount,
    invoices.invoice_id,
    invoices.postdate
from invoices
left join customers on customers.customer_id = invoices.customer_id
where invoices.voidedinvoice = 0
and invoices.customer_id != ?
and invoices.amount > 0
and (? = '' or invoices.invtype = ?)
and invoices.postdate between ? and ?
"#;

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// One result row as the driver decodes it.
#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    email: Option<String>,
    cell_phone: Option<String>,
    home_phone: Option<String>,
    firstname: Option<String>,
    lastname: Option<String>,
    zip: Option<String>,
    bday: Option<String>,
    customer_id: Option<i64>,
    amount: Decimal,
    invoice_id: i64,
    postdate: NaiveDateTime,
}

impl From<PurchaseRow> for RawPurchaseRecord {
    fn from(row: PurchaseRow) -> Self {
        RawPurchaseRecord {
            email: row.email.unwrap_or_default(),
            cell_phone: row.cell_phone.unwrap_or_default(),
            home_phone: row.home_phone.unwrap_or_default(),
            first_name: row.firstname.unwrap_or_default(),
            last_name: row.lastname.unwrap_or_default(),
            zip: row.zip.unwrap_or_default(),
            birth_date: row.bday.as_deref().and_then(parse_birth_date),
            customer_id: row.customer_id.unwrap_or_default(),
            amount: row.amount,
            invoice_id: row.invoice_id,
            posted_at: row.postdate.and_utc(),
        }
    }
}

/// Point-of-sale database source.
///
/// The pool connects lazily with a single connection; constructing a source
/// performs no I/O.
#[derive(Debug, Clone)]
pub struct MySqlSource {
    pool: MySqlPool,
}

impl MySqlSource {
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_pool(
            MySqlPoolOptions::new()
                .max_connections(1)
                .connect_lazy_with(connect_options(config)?),
        ))
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl RecordSource for MySqlSource {
    fn fetch<'a>(&'a self, filter: &'a PurchaseFilter) -> RecordStream<'a> {
        let type_code = filter.type_code.as_deref().unwrap_or("");
        tracing::info!(
            kind = %filter.kind,
            type_code,
            start = %filter.start,
            end = %filter.end,
            "querying purchases"
        );

        sqlx::query_as::<_, PurchaseRow>(PURCHASE_QUERY)
            .bind(filter.excluded_customer_id)
            .bind(type_code)
            .bind(type_code)
            .bind(filter.start.as_str())
            .bind(filter.end.as_str())
            .fetch(&self.pool)
            .map(|row| row.map(RawPurchaseRecord::from).map_err(SourceError::from))
            .boxed()
    }
}

/// `YYYY-MM-DD`, tolerating a trailing time part. Zero, partial and
/// otherwise impossible dates yield `None`.
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date, BIRTH_DATE_FORMAT).ok()
}

fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, ConfigError> {
    let (host, port) = config.host_port()?;
    Ok(MySqlConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name))
}
