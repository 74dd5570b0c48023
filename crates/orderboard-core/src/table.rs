use polars::prelude::*;

use crate::error::{ReportError, Result};
use crate::model::{columns, epoch_days_to_date, OrderRecord};

/// The enriched order table: one row per order with parsed dates and the derived lead time.
///
/// Rows keep input order. Sorted views are new tables; the original is never reordered.
#[derive(Debug, Clone)]
pub struct OrderTable {
    df: DataFrame,
}

impl OrderTable {
    /// Wraps a frame after checking that every report column is present.
    pub fn try_from_dataframe(df: DataFrame) -> Result<Self> {
        for name in columns::REPORT_COLUMNS {
            df.column(name)?;
        }
        Ok(Self { df })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Largest quantity first; ties keep input order.
    pub fn sorted_by_quantity(&self) -> Result<Self> {
        self.sorted_by(columns::QUANTITY, true)
    }

    /// Earliest order date first; ties keep input order.
    pub fn sorted_by_order_date(&self) -> Result<Self> {
        self.sorted_by(columns::ORDER_DATE, false)
    }

    fn sorted_by(&self, column: &str, descending: bool) -> Result<Self> {
        let options = SortMultipleOptions::default()
            .with_order_descending(descending)
            .with_maintain_order(true);
        let df = self.df.sort([column], options)?;
        Ok(Self { df })
    }

    /// Typed rows in table order.
    pub fn records(&self) -> Result<Vec<OrderRecord>> {
        let df = &self.df;
        let ids = df.column(columns::ORDER_ID)?.i64()?;
        let items = df.column(columns::ITEM_NAME)?.str()?;
        let quantities = df.column(columns::QUANTITY)?.i64()?;
        let order_days = df.column(columns::ORDER_DATE)?.cast(&DataType::Int32)?;
        let order_days = order_days.i32()?;
        let delivery_days = df.column(columns::DELIVERY_DATE)?.cast(&DataType::Int32)?;
        let delivery_days = delivery_days.i32()?;
        let lead_times = df.column(columns::LEAD_TIME_DAYS)?.i64()?;
        let statuses = df.column(columns::STATUS)?.str()?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let order_day = required(order_days.get(row), columns::ORDER_DATE, row)?;
            let delivery_day = required(delivery_days.get(row), columns::DELIVERY_DATE, row)?;
            records.push(OrderRecord {
                order_id: required(ids.get(row), columns::ORDER_ID, row)?,
                item_name: required(items.get(row), columns::ITEM_NAME, row)?.to_string(),
                quantity: required(quantities.get(row), columns::QUANTITY, row)?,
                order_date: epoch_days_to_date(order_day)?,
                delivery_date: epoch_days_to_date(delivery_day)?,
                lead_time_days: required(lead_times.get(row), columns::LEAD_TIME_DAYS, row)?,
                status: required(statuses.get(row), columns::STATUS, row)?.to_string(),
            });
        }

        Ok(records)
    }
}

fn required<T>(value: Option<T>, column: &'static str, row: usize) -> Result<T> {
    value.ok_or(ReportError::MissingValue { column, row })
}
