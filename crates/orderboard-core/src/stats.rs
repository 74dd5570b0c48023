use polars::prelude::*;
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::model::{columns, is_delivered_status};
use crate::table::OrderTable;

/// The five headline figures shown on the dashboard and in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub total_items: i64,
    pub average_lead_time_days: f64,
    pub fastest_delivery_days: i64,
    pub slowest_delivery_days: i64,
}

impl OrderSummary {
    /// Mean lead time rounded to one decimal, as printed everywhere.
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average_lead_time_days)
    }
}

/// Reduces the enriched table to its summary figures.
///
/// Fails with [`ReportError::EmptyDataset`] when there is nothing to average.
pub fn summarize(table: &OrderTable) -> Result<OrderSummary> {
    let df = table.dataframe();
    if df.height() == 0 {
        return Err(ReportError::EmptyDataset);
    }

    let quantity = df.column(columns::QUANTITY)?.i64()?;
    let lead_time = df.column(columns::LEAD_TIME_DAYS)?.i64()?;

    Ok(OrderSummary {
        total_orders: df.height(),
        total_items: quantity.sum().unwrap_or(0),
        average_lead_time_days: lead_time.mean().ok_or(ReportError::EmptyDataset)?,
        fastest_delivery_days: lead_time.min().ok_or(ReportError::EmptyDataset)?,
        slowest_delivery_days: lead_time.max().ok_or(ReportError::EmptyDataset)?,
    })
}

/// Share of orders whose status marks them as delivered, in percent.
pub fn delivered_percentage(table: &OrderTable) -> Result<f64> {
    let df = table.dataframe();
    if df.height() == 0 {
        return Err(ReportError::EmptyDataset);
    }

    let statuses = df.column(columns::STATUS)?.str()?;
    let delivered = statuses
        .into_iter()
        .flatten()
        .filter(|status| is_delivered_status(status))
        .count();

    Ok(delivered as f64 * 100.0 / df.height() as f64)
}
