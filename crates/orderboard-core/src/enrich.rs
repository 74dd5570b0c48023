use std::collections::HashSet;

use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::{ReportError, Result};
use crate::model::{columns, date_to_epoch_days, parse_date, RawOrder};
use crate::table::OrderTable;

/// Parses the raw rows into a typed table and adds the `lead_time_days` column.
///
/// Dates are parsed exactly once here and stay polars `Date` values from then on.
/// Negative lead times and repeated order ids are passed through unchanged and only
/// reported through `tracing`.
pub fn enrich_orders(orders: &[RawOrder]) -> Result<OrderTable> {
    let parsed = build_order_frame(orders)?;
    let enriched = apply_lead_times(&parsed)?;

    report_anomalies(orders, &enriched)?;
    debug!(rows = enriched.height(), "Enriched order table");

    OrderTable::try_from_dataframe(enriched)
}

/// Builds the base frame (all report columns except the lead time) from raw rows.
pub fn build_order_frame(orders: &[RawOrder]) -> Result<DataFrame> {
    let len = orders.len();
    let mut ids = Vec::with_capacity(len);
    let mut items = Vec::with_capacity(len);
    let mut quantities = Vec::with_capacity(len);
    let mut order_days = Vec::with_capacity(len);
    let mut delivery_days = Vec::with_capacity(len);
    let mut statuses = Vec::with_capacity(len);

    for order in orders {
        let order_date = parse_field(order, columns::ORDER_DATE, &order.order_date)?;
        let delivery_date = parse_field(order, columns::DELIVERY_DATE, &order.delivery_date)?;

        ids.push(order.order_id);
        items.push(order.item_name.as_str());
        quantities.push(order.quantity);
        order_days.push(date_to_epoch_days(order_date));
        delivery_days.push(date_to_epoch_days(delivery_date));
        statuses.push(order.status.as_str());
    }

    let order_dates = Series::new(columns::ORDER_DATE.into(), order_days).cast(&DataType::Date)?;
    let delivery_dates =
        Series::new(columns::DELIVERY_DATE.into(), delivery_days).cast(&DataType::Date)?;

    let cols: Vec<Column> = vec![
        Series::new(columns::ORDER_ID.into(), ids).into(),
        Series::new(columns::ITEM_NAME.into(), items).into(),
        Series::new(columns::QUANTITY.into(), quantities).into(),
        order_dates.into(),
        delivery_dates.into(),
        Series::new(columns::STATUS.into(), statuses).into(),
    ];

    Ok(DataFrame::new(cols)?)
}

/// Appends `lead_time_days = delivery_date - order_date` and returns the frame in report
/// column order.
pub fn apply_lead_times(df: &DataFrame) -> std::result::Result<DataFrame, PolarsError> {
    let order_days = df.column(columns::ORDER_DATE)?.cast(&DataType::Int32)?;
    let delivery_days = df.column(columns::DELIVERY_DATE)?.cast(&DataType::Int32)?;

    let lead_times: Vec<Option<i64>> = order_days
        .i32()?
        .into_iter()
        .zip(delivery_days.i32()?)
        .map(|(ordered, delivered)| match (ordered, delivered) {
            (Some(ordered), Some(delivered)) => Some(i64::from(delivered) - i64::from(ordered)),
            _ => None,
        })
        .collect();

    let mut output = df.clone();
    output.hstack_mut(&mut [Series::new(columns::LEAD_TIME_DAYS.into(), lead_times).into()])?;
    output.select(columns::REPORT_COLUMNS)
}

fn parse_field(order: &RawOrder, field: &'static str, value: &str) -> Result<chrono::NaiveDate> {
    parse_date(value).map_err(|source| ReportError::InvalidDate {
        order_id: order.order_id,
        field,
        value: value.to_string(),
        source,
    })
}

fn report_anomalies(orders: &[RawOrder], enriched: &DataFrame) -> Result<()> {
    let mut seen = HashSet::with_capacity(orders.len());
    for order in orders {
        if !seen.insert(order.order_id) {
            warn!(order_id = order.order_id, "Duplicate order id in input");
        }
    }

    let lead_times = enriched.column(columns::LEAD_TIME_DAYS)?.i64()?;
    for (order, lead_time) in orders.iter().zip(lead_times) {
        if let Some(days) = lead_time.filter(|days| *days < 0) {
            warn!(
                order_id = order.order_id,
                lead_time_days = days,
                "Delivery date precedes order date"
            );
        }
    }

    Ok(())
}
