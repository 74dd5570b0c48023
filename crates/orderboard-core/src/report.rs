use std::fs;
use std::path::Path;

use comfy_table::presets::NOTHING;
use comfy_table::{CellAlignment, Table};
use tracing::info;

use crate::error::Result;
use crate::locale::{Labels, Locale};
use crate::model::{format_date, OrderRecord};
use crate::stats::OrderSummary;

// Numeric columns of the dump: id, quantity, lead time.
const RIGHT_ALIGNED_COLUMNS: [usize; 3] = [0, 2, 5];

/// The five summary figures as `label: value` lines, in a fixed order.
pub fn summary_lines(summary: &OrderSummary, labels: &Labels) -> Vec<String> {
    vec![
        format!("{}: {}", labels.total_orders, summary.total_orders),
        format!("{}: {}", labels.total_items, summary.total_items),
        format!(
            "{}: {} {}",
            labels.average_lead_time,
            summary.average_display(),
            labels.days
        ),
        format!(
            "{}: {} {}",
            labels.fastest_delivery, summary.fastest_delivery_days, labels.days
        ),
        format!(
            "{}: {} {}",
            labels.slowest_delivery, summary.slowest_delivery_days, labels.days
        ),
    ]
}

/// Whitespace-aligned dump of the table in display column order.
pub fn order_table(records: &[OrderRecord], labels: &Labels) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(vec![
        labels.order_id_header,
        labels.item_header,
        labels.quantity_header,
        labels.order_date_header,
        labels.delivery_date_header,
        labels.lead_time_header,
        labels.status_header,
    ]);

    for record in records {
        table.add_row(vec![
            record.order_id.to_string(),
            record.item_name.clone(),
            record.quantity.to_string(),
            format_date(record.order_date),
            format_date(record.delivery_date),
            record.lead_time_days.to_string(),
            record.status.clone(),
        ]);
    }

    for idx in RIGHT_ALIGNED_COLUMNS {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of the text report artifact.
pub fn render_report(records: &[OrderRecord], summary: &OrderSummary, locale: Locale) -> String {
    let labels = locale.labels();
    let mut out = String::new();

    out.push_str(labels.report_title);
    out.push('\n');
    out.push_str(&"=".repeat(labels.report_title.chars().count()));
    out.push_str("\n\n");

    out.push_str(labels.key_metrics);
    out.push_str(":\n");
    for line in summary_lines(summary, labels) {
        out.push_str("- ");
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');

    out.push_str(labels.order_overview);
    out.push_str(":\n");
    out.push_str(&order_table(records, labels));
    out.push('\n');

    out
}

/// Text printed to stdout for interactive inspection.
pub fn render_console(records: &[OrderRecord], summary: &OrderSummary, locale: Locale) -> String {
    let labels = locale.labels();
    let mut out = format!("=== {} ===\n", labels.key_metrics);
    for line in summary_lines(summary, labels) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("=== {} ===\n", labels.order_overview_with_lead_time));
    out.push_str(&order_table(records, labels));
    out.push('\n');
    out
}

/// Writes (and overwrites) the text report as UTF-8.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote text report");
    Ok(())
}
