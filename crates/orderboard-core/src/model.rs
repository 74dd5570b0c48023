use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Text format used for dates in the input table and in every rendered artifact.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

// Days between 0001-01-01 (CE day 1) and 1970-01-01, the polars `Date` epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Column names of the enriched order table.
pub mod columns {
    pub const ORDER_ID: &str = "order_id";
    pub const ITEM_NAME: &str = "item_name";
    pub const QUANTITY: &str = "quantity";
    pub const ORDER_DATE: &str = "order_date";
    pub const DELIVERY_DATE: &str = "delivery_date";
    pub const LEAD_TIME_DAYS: &str = "lead_time_days";
    pub const STATUS: &str = "status";

    /// Display order used by the text report and the console dump.
    pub const REPORT_COLUMNS: [&str; 7] = [
        ORDER_ID,
        ITEM_NAME,
        QUANTITY,
        ORDER_DATE,
        DELIVERY_DATE,
        LEAD_TIME_DAYS,
        STATUS,
    ];
}

/// Status labels that count as a completed delivery, compared case-insensitively.
const DELIVERED_STATUSES: [&str; 2] = ["ausgeliefert", "delivered"];

/// One row as it appears in the literal table or an input CSV, dates still as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrder {
    pub order_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub order_date: String,
    pub delivery_date: String,
    pub status: String,
}

impl RawOrder {
    pub fn new(
        order_id: i64,
        item_name: impl Into<String>,
        quantity: i64,
        order_date: impl Into<String>,
        delivery_date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            item_name: item_name.into(),
            quantity,
            order_date: order_date.into(),
            delivery_date: delivery_date.into(),
            status: status.into(),
        }
    }
}

/// A fully parsed and enriched order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    pub order_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub lead_time_days: i64,
    pub status: String,
}

pub fn is_delivered_status(status: &str) -> bool {
    let normalized = status.trim().to_lowercase();
    DELIVERED_STATUSES.contains(&normalized.as_str())
}

pub fn parse_date(text: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Day number relative to 1970-01-01, the physical representation of a polars `Date`.
pub fn date_to_epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn epoch_days_to_date(days: i32) -> Result<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or(ReportError::DateOutOfRange(days))
}
