use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::chart::{self, Dashboard};
use crate::enrich::enrich_orders;
use crate::error::Result;
use crate::locale::Locale;
use crate::model::{OrderRecord, RawOrder};
use crate::report;
use crate::stats::{self, OrderSummary};
use crate::table::OrderTable;

/// Everything the pipeline derives from one input table, before anything touches disk.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub locale: Locale,
    pub table: OrderTable,
    pub records: Vec<OrderRecord>,
    pub summary: OrderSummary,
    pub delivered_percentage: f64,
    pub dashboard: Dashboard,
    pub report: String,
}

impl PipelineOutput {
    pub fn console_text(&self) -> String {
        report::render_console(&self.records, &self.summary, self.locale)
    }

    pub fn dashboard_html(&self) -> String {
        chart::render_html(&self.dashboard)
    }

    pub fn summary_document(&self) -> SummaryDocument<'_> {
        SummaryDocument {
            generator: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            locale: self.locale,
            summary: &self.summary,
            delivered_percentage: self.delivered_percentage,
            orders: &self.records,
        }
    }
}

/// JSON export of the summary. Carries no timestamp so repeated runs produce identical bytes.
#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub generator: &'static str,
    pub version: &'static str,
    pub locale: Locale,
    pub summary: &'a OrderSummary,
    pub delivered_percentage: f64,
    pub orders: &'a [OrderRecord],
}

/// File names of the artifacts, resolved against `out_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub out_dir: PathBuf,
    pub dashboard_file: String,
    pub report_file: String,
    pub summary_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub dashboard: PathBuf,
    pub report: PathBuf,
    pub summary: Option<PathBuf>,
}

/// Parses, enriches, aggregates and renders. Pure apart from logging.
pub fn run(orders: &[RawOrder], locale: Locale) -> Result<PipelineOutput> {
    let table = enrich_orders(orders)?;
    let records = table.records()?;
    let summary = stats::summarize(&table)?;
    let delivered_percentage = stats::delivered_percentage(&table)?;
    info!(
        orders = summary.total_orders,
        items = summary.total_items,
        average_lead_time_days = summary.average_lead_time_days,
        "Summarized orders"
    );

    let dashboard =
        chart::build_dashboard(&table, &records, &summary, delivered_percentage, locale)?;
    let report = report::render_report(&records, &summary, locale);

    Ok(PipelineOutput {
        locale,
        table,
        records,
        summary,
        delivered_percentage,
        dashboard,
        report,
    })
}

/// Writes the dashboard, the text report and, if requested, the JSON summary.
///
/// Files are overwritten. A failure part-way leaves earlier artifacts in place.
pub fn write_artifacts(output: &PipelineOutput, paths: &ArtifactPaths) -> Result<WrittenArtifacts> {
    fs::create_dir_all(&paths.out_dir)?;

    let dashboard = paths.out_dir.join(&paths.dashboard_file);
    chart::write_dashboard(&dashboard, &output.dashboard_html())?;

    let report_path = paths.out_dir.join(&paths.report_file);
    report::write_report(&report_path, &output.report)?;

    let summary = match &paths.summary_file {
        Some(name) => {
            let path = paths.out_dir.join(name);
            write_summary_json(&path, output)?;
            Some(path)
        }
        None => None,
    };

    Ok(WrittenArtifacts {
        dashboard,
        report: report_path,
        summary,
    })
}

fn write_summary_json(path: &Path, output: &PipelineOutput) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(&output.summary_document())?;
    bytes.push(b'\n');
    fs::write(path, &bytes)?;
    info!(path = %path.display(), "Wrote summary JSON");
    Ok(())
}
