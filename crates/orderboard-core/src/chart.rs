//! Four-panel order dashboard rendered as a self-contained HTML page with inline SVG.
//!
//! [`build_dashboard`] turns the enriched table into a [`Dashboard`] description, which
//! [`render_html`] lays out on a fixed 1200x800 canvas. Every mark carries an SVG
//! `<title>` so browsers show the exact value on hover.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::locale::Locale;
use crate::model::{format_date, OrderRecord};
use crate::stats::OrderSummary;
use crate::table::OrderTable;

pub const PRIMARY_BLUE: &str = "#0166B1";
pub const LIGHT_BLUE: &str = "#1C69D3";
pub const GRADIENT: [&str; 5] = [PRIMARY_BLUE, LIGHT_BLUE, "#3A8DDE", "#63A1E0", "#8FB6E3"];
pub const REFERENCE_RED: &str = "#D62728";
const PAGE_BACKGROUND: &str = "#FFFFFF";
const PLOT_BACKGROUND: &str = "#F5F5F5";
const TEXT_COLOR: &str = "#333333";
const GRID_COLOR: &str = "rgba(211, 211, 211, 0.5)";

const CANVAS_WIDTH: f64 = 1200.0;
const CANVAS_HEIGHT: f64 = 800.0;
const MARGIN_TOP: f64 = 120.0;
const MARGIN_BOTTOM: f64 = 20.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 40.0;
const HORIZONTAL_SPACING: f64 = 0.08;
const VERTICAL_SPACING: f64 = 0.12;
const PANEL_TITLE_HEIGHT: f64 = 24.0;
const PANEL_AXIS_HEIGHT: f64 = 40.0;
const BAR_FILL: f64 = 0.7;
const TARGET_TICKS: usize = 5;

const BADGE_POSITIONS: [f64; 4] = [0.125, 0.375, 0.625, 0.875];
const BADGE_Y: f64 = 52.0;
const BADGE_WIDTH: f64 = 190.0;
const BADGE_HEIGHT: f64 = 50.0;

/// Head directives that pin the page to a light color scheme regardless of viewer settings.
pub const LIGHT_SCHEME_HEAD: &str = r#"<meta name="color-scheme" content="light">
    <style>
        body {
            background-color: white !important;
            color: #333333 !important;
        }
        .dashboard {
            background-color: white !important;
        }
        .dashboard svg {
            background-color: white !important;
        }
    </style>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    LineWithMarkers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Dashed horizontal line at a fixed value, optionally labelled at the right end.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub value: f64,
    pub color: String,
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: SeriesKind,
    pub points: Vec<DataPoint>,
    pub reference: Option<ReferenceLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiBadge {
    pub caption: String,
    pub value: String,
    /// Horizontal centre as a fraction of the canvas width.
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub lang: String,
    pub badges: Vec<KpiBadge>,
    /// Row-major 2x2 grid.
    pub panels: Vec<Panel>,
}

/// Describes the four panels and the KPI badges for an enriched table.
///
/// `records` are the table rows in input order and `delivered` is the delivered
/// share in percent, both as already computed by the caller. The sorted views
/// are taken from `table`.
pub fn build_dashboard(
    table: &OrderTable,
    records: &[OrderRecord],
    summary: &OrderSummary,
    delivered: f64,
    locale: Locale,
) -> Result<Dashboard> {
    let labels = locale.labels();
    let by_quantity = table.sorted_by_quantity()?.records()?;
    let by_date = table.sorted_by_order_date()?.records()?;
    let average = summary.average_lead_time_days;
    let average_text = format!(
        "{} {} {}",
        labels.average_symbol,
        summary.average_display(),
        labels.days
    );

    let quantity_by_item = Panel {
        title: labels.quantity_by_item.to_string(),
        x_label: labels.item_axis.to_string(),
        y_label: labels.quantity_axis.to_string(),
        kind: SeriesKind::Bar,
        points: by_quantity
            .iter()
            .map(|record| point(&record.item_name, record.quantity as f64, PRIMARY_BLUE))
            .collect(),
        reference: None,
    };

    let lead_time_by_item = Panel {
        title: labels.lead_time_by_item.to_string(),
        x_label: labels.item_axis.to_string(),
        y_label: labels.lead_time_axis.to_string(),
        kind: SeriesKind::Bar,
        points: records
            .iter()
            .map(|record| point(&record.item_name, record.lead_time_days as f64, LIGHT_BLUE))
            .collect(),
        reference: Some(ReferenceLine {
            value: average,
            color: REFERENCE_RED.to_string(),
            annotation: Some(average_text),
        }),
    };

    let lead_time_over_time = Panel {
        title: labels.lead_time_over_time.to_string(),
        x_label: labels.order_date_axis.to_string(),
        y_label: labels.lead_time_axis.to_string(),
        kind: SeriesKind::LineWithMarkers,
        points: by_date
            .iter()
            .map(|record| {
                point(
                    &format_date(record.order_date),
                    record.lead_time_days as f64,
                    PRIMARY_BLUE,
                )
            })
            .collect(),
        reference: Some(ReferenceLine {
            value: average,
            color: REFERENCE_RED.to_string(),
            annotation: None,
        }),
    };

    let volume_by_date = Panel {
        title: labels.volume_by_date.to_string(),
        x_label: labels.order_date_axis.to_string(),
        y_label: labels.quantity_axis.to_string(),
        kind: SeriesKind::Bar,
        points: by_date
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                point(
                    &format_date(record.order_date),
                    record.quantity as f64,
                    GRADIENT[idx % GRADIENT.len()],
                )
            })
            .collect(),
        reference: None,
    };

    let badge_values = [
        (labels.total_orders, summary.total_orders.to_string()),
        (labels.total_items, summary.total_items.to_string()),
        (
            labels.average_lead_time_short,
            format!("{} {}", summary.average_display(), labels.days),
        ),
        (
            labels.delivery_status,
            format!("{}% {}", format_percentage(delivered), labels.delivered),
        ),
    ];
    let badges = badge_values
        .into_iter()
        .zip(BADGE_POSITIONS)
        .map(|((caption, value), x)| KpiBadge {
            caption: caption.to_string(),
            value,
            x,
        })
        .collect();

    Ok(Dashboard {
        title: labels.dashboard_title.to_string(),
        lang: labels.html_lang.to_string(),
        badges,
        panels: vec![
            quantity_by_item,
            lead_time_by_item,
            lead_time_over_time,
            volume_by_date,
        ],
    })
}

fn point(label: &str, value: f64, color: &str) -> DataPoint {
    DataPoint {
        label: label.to_string(),
        value,
        color: color.to_string(),
    }
}

/// Full HTML document with the light-scheme directives injected into `<head>`.
pub fn render_html(dashboard: &Dashboard) -> String {
    let title = escape_xml(&dashboard.title);
    let page = format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n    <meta charset=\"utf-8\">\n    \
         <title>{title}</title>\n</head>\n<body>\n<div class=\"dashboard\">\n{svg}</div>\n\
         </body>\n</html>\n",
        lang = escape_xml(&dashboard.lang),
        svg = render_svg(dashboard),
    );
    inject_light_scheme(&page)
}

/// Inserts [`LIGHT_SCHEME_HEAD`] right after the first `<head>` tag.
pub fn inject_light_scheme(html: &str) -> String {
    html.replacen("<head>", &format!("<head>\n    {LIGHT_SCHEME_HEAD}"), 1)
}

pub fn write_dashboard(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html)?;
    info!(path = %path.display(), bytes = html.len(), "Wrote dashboard");
    Ok(())
}

/// The bare SVG canvas: title, badges and the 2x2 panel grid.
pub fn render_svg(dashboard: &Dashboard) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_WIDTH}\" \
         height=\"{CANVAS_HEIGHT}\" viewBox=\"0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}\" \
         font-family=\"Arial, sans-serif\" fill=\"{TEXT_COLOR}\">\n"
    );
    svg.push_str(&format!(
        "<rect width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"{PAGE_BACKGROUND}\"/>\n"
    ));
    svg.push_str(&format!(
        "<text class=\"title\" x=\"{}\" y=\"24\" text-anchor=\"middle\" font-size=\"20\" \
         fill=\"{PRIMARY_BLUE}\">{}</text>\n",
        CANVAS_WIDTH / 2.0,
        escape_xml(&dashboard.title)
    ));

    for badge in &dashboard.badges {
        svg.push_str(&render_badge(badge));
    }

    for (idx, panel) in dashboard.panels.iter().enumerate() {
        svg.push_str(&render_panel(panel, panel_cell(idx / 2, idx % 2)));
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_badge(badge: &KpiBadge) -> String {
    let cx = badge.x * CANVAS_WIDTH;
    format!(
        "<g class=\"kpi-badge\" opacity=\"0.8\">\n\
         <rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{BADGE_WIDTH}\" height=\"{BADGE_HEIGHT}\" \
         fill=\"white\" stroke=\"{PRIMARY_BLUE}\" stroke-width=\"2\"/>\n\
         <text x=\"{cx:.1}\" y=\"{caption_y:.1}\" text-anchor=\"middle\" font-size=\"14\" \
         font-weight=\"bold\" fill=\"{PRIMARY_BLUE}\">{caption}</text>\n\
         <text x=\"{cx:.1}\" y=\"{value_y:.1}\" text-anchor=\"middle\" font-size=\"14\" \
         fill=\"{PRIMARY_BLUE}\">{value}</text>\n</g>\n",
        x = cx - BADGE_WIDTH / 2.0,
        y = BADGE_Y - BADGE_HEIGHT / 2.0,
        caption_y = BADGE_Y - 4.0,
        value_y = BADGE_Y + 16.0,
        caption = escape_xml(&badge.caption),
        value = escape_xml(&badge.value),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

fn panel_cell(row: usize, col: usize) -> Rect {
    let grid_width = CANVAS_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let grid_height = CANVAS_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let width = grid_width * (1.0 - HORIZONTAL_SPACING) / 2.0;
    let height = grid_height * (1.0 - VERTICAL_SPACING) / 2.0;
    Rect {
        x: MARGIN_LEFT + col as f64 * (width + grid_width * HORIZONTAL_SPACING),
        y: MARGIN_TOP + row as f64 * (height + grid_height * VERTICAL_SPACING),
        width,
        height,
    }
}

/// Linear value-to-pixel mapping for a panel's y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct YScale {
    min: f64,
    max: f64,
    step: f64,
    top: f64,
    bottom: f64,
}

impl YScale {
    fn fit(values: impl IntoIterator<Item = f64>, top: f64, bottom: f64) -> Self {
        let (low, high) = values
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(low, high), v| (low.min(v), high.max(v)));
        let step = nice_step(high - low, TARGET_TICKS);
        let mut min = (low / step).floor() * step;
        let mut max = (high / step).ceil() * step;
        if max <= min {
            min = min.min(0.0);
            max = min + step;
        }
        Self {
            min,
            max,
            step,
            top,
            bottom,
        }
    }

    fn y(&self, value: f64) -> f64 {
        let ratio = (value - self.min) / (self.max - self.min);
        self.bottom - ratio * (self.bottom - self.top)
    }

    fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count)
            .map(|idx| self.min + idx as f64 * self.step)
            .collect()
    }
}

/// Whole percentages print without decimals; anything else is floored to one
/// decimal so a share below 100 never reads as "100".
fn format_percentage(value: f64) -> String {
    let floored = (value * 10.0).floor() / 10.0;
    if floored.fract() == 0.0 {
        format!("{floored:.0}")
    } else {
        format!("{floored:.1}")
    }
}

/// Tick spacing of 1, 2 or 5 times a power of ten giving roughly `target` ticks over `span`.
fn nice_step(span: f64, target: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

fn render_panel(panel: &Panel, cell: Rect) -> String {
    let plot = Rect {
        x: cell.x,
        y: cell.y + PANEL_TITLE_HEIGHT,
        width: cell.width,
        height: cell.height - PANEL_TITLE_HEIGHT - PANEL_AXIS_HEIGHT,
    };
    let values = panel
        .points
        .iter()
        .map(|p| p.value)
        .chain(panel.reference.as_ref().map(|r| r.value));
    let scale = YScale::fit(values, plot.y, plot.bottom());
    let band = plot.width / panel.points.len().max(1) as f64;
    let center = |idx: usize| plot.x + band * (idx as f64 + 0.5);

    let mut out = String::from("<g class=\"panel\">\n");
    out.push_str(&format!(
        "<text class=\"panel-title\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" \
         font-size=\"16\">{}</text>\n",
        cell.x + cell.width / 2.0,
        cell.y + 14.0,
        escape_xml(&panel.title)
    ));
    out.push_str(&format!(
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{PLOT_BACKGROUND}\"/>\n",
        plot.x, plot.y, plot.width, plot.height
    ));

    for tick in scale.ticks() {
        let y = scale.y(tick);
        out.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"{GRID_COLOR}\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{}</text>\n",
            plot.x,
            plot.x + plot.width,
            plot.x - 6.0,
            y + 4.0,
            format_tick(tick)
        ));
    }

    match panel.kind {
        SeriesKind::Bar => {
            let zero = scale.y(0.0);
            let width = band * BAR_FILL;
            for (idx, p) in panel.points.iter().enumerate() {
                let y = scale.y(p.value);
                out.push_str(&format!(
                    "<rect class=\"mark\" x=\"{:.1}\" y=\"{:.1}\" width=\"{width:.1}\" \
                     height=\"{:.1}\" fill=\"{}\"><title>{}: {}</title></rect>\n",
                    center(idx) - width / 2.0,
                    y.min(zero),
                    (zero - y).abs(),
                    escape_xml(&p.color),
                    escape_xml(&p.label),
                    format_tick(p.value)
                ));
            }
        }
        SeriesKind::LineWithMarkers => {
            let coords: Vec<String> = panel
                .points
                .iter()
                .enumerate()
                .map(|(idx, p)| format!("{:.1},{:.1}", center(idx), scale.y(p.value)))
                .collect();
            let stroke = panel
                .points
                .first()
                .map(|p| p.color.as_str())
                .unwrap_or(PRIMARY_BLUE);
            out.push_str(&format!(
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"3\"/>\n",
                coords.join(" "),
                escape_xml(stroke)
            ));
            for (idx, p) in panel.points.iter().enumerate() {
                out.push_str(&format!(
                    "<circle class=\"mark\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"5\" fill=\"{}\">\
                     <title>{}: {}</title></circle>\n",
                    center(idx),
                    scale.y(p.value),
                    escape_xml(&p.color),
                    escape_xml(&p.label),
                    format_tick(p.value)
                ));
            }
        }
    }

    if let Some(reference) = &panel.reference {
        let y = scale.y(reference.value);
        let color = escape_xml(&reference.color);
        let last = panel.points.len().saturating_sub(1);
        // Bars get an edge-to-edge line; a line series spans its first to last marker.
        let (x1, x2) = match panel.kind {
            SeriesKind::LineWithMarkers if !panel.points.is_empty() => (center(0), center(last)),
            _ => (plot.x, plot.x + plot.width),
        };
        out.push_str(&format!(
            "<line class=\"reference\" x1=\"{x1:.1}\" y1=\"{y:.1}\" x2=\"{x2:.1}\" y2=\"{y:.1}\" \
             stroke=\"{color}\" stroke-width=\"2\" stroke-dasharray=\"6 4\"/>\n"
        ));
        if let Some(text) = &reference.annotation {
            out.push_str(&format!(
                "<text class=\"annotation\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" \
                 font-size=\"12\" fill=\"{color}\">{}</text>\n",
                center(last),
                y - 6.0,
                escape_xml(text)
            ));
        }
    }

    for (idx, p) in panel.points.iter().enumerate() {
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\">{}</text>\n",
            center(idx),
            plot.bottom() + 14.0,
            escape_xml(&p.label)
        ));
    }
    out.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\">{}</text>\n",
        plot.x + plot.width / 2.0,
        plot.bottom() + 32.0,
        escape_xml(&panel.x_label)
    ));
    let y_mid = plot.y + plot.height / 2.0;
    let y_title_x = plot.x - 40.0;
    out.push_str(&format!(
        "<text x=\"{y_title_x:.1}\" y=\"{y_mid:.1}\" text-anchor=\"middle\" font-size=\"12\" \
         transform=\"rotate(-90 {y_title_x:.1} {y_mid:.1})\">{}</text>\n",
        escape_xml(&panel.y_label)
    ));

    out.push_str("</g>\n");
    out
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
