use anyhow::Result;
use orderboard_core::dataset::sample_orders;
use orderboard_core::enrich::enrich_orders;
use orderboard_core::model::RawOrder;
use orderboard_core::stats::{delivered_percentage, summarize};
use orderboard_core::ReportError;

#[test]
fn sample_summary_matches_known_figures() -> Result<()> {
    let table = enrich_orders(&sample_orders())?;
    let summary = summarize(&table)?;

    assert_eq!(summary.total_orders, 5);
    assert_eq!(summary.total_items, 285);
    assert!((summary.average_lead_time_days - 13.4).abs() < 1e-9);
    assert_eq!(summary.fastest_delivery_days, 8);
    assert_eq!(summary.slowest_delivery_days, 15);
    assert_eq!(summary.average_display(), "13.4");
    Ok(())
}

#[test]
fn single_record_has_equal_mean_min_and_max() -> Result<()> {
    let orders = vec![RawOrder::new(
        7,
        "Getriebe",
        3,
        "01.03.2023",
        "11.03.2023",
        "Ausgeliefert",
    )];
    let summary = summarize(&enrich_orders(&orders)?)?;

    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.fastest_delivery_days, 10);
    assert_eq!(summary.slowest_delivery_days, 10);
    assert!((summary.average_lead_time_days - 10.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn empty_table_cannot_be_summarized() -> Result<()> {
    let table = enrich_orders(&[])?;
    assert!(matches!(summarize(&table), Err(ReportError::EmptyDataset)));
    assert!(matches!(
        delivered_percentage(&table),
        Err(ReportError::EmptyDataset)
    ));
    Ok(())
}

#[test]
fn delivered_percentage_counts_delivered_statuses() -> Result<()> {
    let table = enrich_orders(&sample_orders())?;
    assert!((delivered_percentage(&table)? - 100.0).abs() < 1e-9);

    let mut orders = sample_orders();
    orders[0].status = "In Bearbeitung".to_string();
    orders[1].status = "Delivered".to_string();
    let table = enrich_orders(&orders)?;
    assert!((delivered_percentage(&table)? - 80.0).abs() < 1e-9);
    Ok(())
}
