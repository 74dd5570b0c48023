use anyhow::Result;
use chrono::NaiveDate;
use orderboard_core::chart::{
    build_dashboard, inject_light_scheme, render_html, SeriesKind, GRADIENT, REFERENCE_RED,
};
use orderboard_core::dataset::sample_orders;
use orderboard_core::enrich::enrich_orders;
use orderboard_core::model::parse_date;
use orderboard_core::stats::{delivered_percentage, summarize};
use orderboard_core::{pipeline, Locale, RawOrder};

fn sample_dashboard(locale: Locale) -> Result<orderboard_core::chart::Dashboard> {
    let table = enrich_orders(&sample_orders())?;
    let records = table.records()?;
    let summary = summarize(&table)?;
    let delivered = delivered_percentage(&table)?;
    Ok(build_dashboard(&table, &records, &summary, delivered, locale)?)
}

fn status_badge(dashboard: &orderboard_core::chart::Dashboard) -> Option<&str> {
    dashboard.badges.last().map(|b| b.value.as_str())
}

#[test]
fn dashboard_has_four_panels_in_grid_order() -> Result<()> {
    let dashboard = sample_dashboard(Locale::De)?;
    let titles: Vec<&str> = dashboard.panels.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Bestellmenge nach Artikeltyp",
            "Lieferzeit nach Artikeltyp",
            "Lieferzeit im Zeitverlauf",
            "Bestellvolumen nach Datum"
        ]
    );
    assert_eq!(dashboard.panels[2].kind, SeriesKind::LineWithMarkers);
    Ok(())
}

#[test]
fn quantity_panel_is_ranked_descending() -> Result<()> {
    let dashboard = sample_dashboard(Locale::De)?;
    let points = &dashboard.panels[0].points;
    assert_eq!(points[0].label, "Motoröl");
    assert!(points.windows(2).all(|w| w[0].value >= w[1].value));
    Ok(())
}

#[test]
fn date_panels_are_ordered_by_order_date() -> Result<()> {
    let dashboard = sample_dashboard(Locale::De)?;
    for panel in &dashboard.panels[2..] {
        let dates: Vec<NaiveDate> = panel
            .points
            .iter()
            .map(|p| parse_date(&p.label))
            .collect::<Result<_, _>>()?;
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }
    Ok(())
}

#[test]
fn lead_time_panels_carry_the_mean_reference_line() -> Result<()> {
    let dashboard = sample_dashboard(Locale::De)?;

    let by_item = dashboard.panels[1]
        .reference
        .as_ref()
        .expect("mean line on lead time panel");
    assert!((by_item.value - 13.4).abs() < 1e-9);
    assert_eq!(by_item.color, REFERENCE_RED);
    assert_eq!(by_item.annotation.as_deref(), Some("Ø 13.4 Tage"));

    let over_time = dashboard.panels[2]
        .reference
        .as_ref()
        .expect("mean line on timeline panel");
    assert!((over_time.value - 13.4).abs() < 1e-9);
    assert!(dashboard.panels[0].reference.is_none());
    Ok(())
}

#[test]
fn volume_panel_uses_the_colour_gradient() -> Result<()> {
    let dashboard = sample_dashboard(Locale::De)?;
    let colors: Vec<&str> = dashboard.panels[3]
        .points
        .iter()
        .map(|p| p.color.as_str())
        .collect();
    assert_eq!(colors, GRADIENT.to_vec());
    Ok(())
}

#[test]
fn badges_show_the_headline_figures() -> Result<()> {
    let dashboard = sample_dashboard(Locale::De)?;
    let badges: Vec<(&str, &str)> = dashboard
        .badges
        .iter()
        .map(|b| (b.caption.as_str(), b.value.as_str()))
        .collect();
    assert_eq!(
        badges,
        vec![
            ("Gesamtbestellungen", "5"),
            ("Gesamtartikel", "285"),
            ("Ø Lieferzeit", "13.4 Tage"),
            ("Lieferstatus", "100% Ausgeliefert"),
        ]
    );
    Ok(())
}

#[test]
fn status_badge_uses_the_given_delivered_share() -> Result<()> {
    let table = enrich_orders(&sample_orders())?;
    let records = table.records()?;
    let summary = summarize(&table)?;
    let dashboard = build_dashboard(&table, &records, &summary, 40.0, Locale::En)?;
    assert_eq!(status_badge(&dashboard), Some("40% Delivered"));
    Ok(())
}

#[test]
fn status_badge_never_rounds_a_partial_share_up_to_100() -> Result<()> {
    let orders: Vec<RawOrder> = (0..200)
        .map(|idx| {
            let status = if idx == 0 { "Storniert" } else { "Ausgeliefert" };
            RawOrder::new(20_000 + idx, "Reifen", 4, "01.03.2023", "08.03.2023", status)
        })
        .collect();
    let output = pipeline::run(&orders, Locale::De)?;
    assert_eq!(status_badge(&output.dashboard), Some("99.5% Ausgeliefert"));
    Ok(())
}

#[test]
fn html_is_self_contained_and_forces_light_scheme() -> Result<()> {
    let html = render_html(&sample_dashboard(Locale::En)?);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<html lang=\"en\">"));
    assert!(html.contains("<meta name=\"color-scheme\" content=\"light\">"));
    assert!(html.contains("background-color: white !important;"));
    assert!(!html.contains("<script"));
    assert_eq!(html.matches("class=\"panel\"").count(), 4);
    assert_eq!(html.matches("class=\"kpi-badge\"").count(), 4);
    assert_eq!(html.matches("class=\"reference\"").count(), 2);
    assert!(html.contains("<title>Getriebe: 50</title>"));
    assert!(html.contains("Order and Production System Dashboard"));
    Ok(())
}

#[test]
fn light_scheme_is_injected_once_after_head() {
    let html = inject_light_scheme("<html><head><title>x</title></head><body><head></body></html>");
    assert_eq!(html.matches("color-scheme").count(), 1);
    assert!(html.starts_with("<html><head>\n    <meta name=\"color-scheme\""));
}
