use anyhow::Result;
use orderboard_core::dataset::sample_orders;
use orderboard_core::pipeline::run;
use orderboard_core::report::{order_table, render_report, summary_lines};
use orderboard_core::Locale;

#[test]
fn german_report_lists_summary_then_table() -> Result<()> {
    let output = run(&sample_orders(), Locale::De)?;
    let report = &output.report;
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "Bestell- und Produktionssystem Datenanalyse");
    assert_eq!(lines[1].len(), lines[0].chars().count());
    assert!(lines[1].chars().all(|c| c == '='));
    assert_eq!(lines[3], "Kernkennzahlen:");
    assert_eq!(lines[4], "- Gesamtbestellungen: 5");
    assert_eq!(lines[5], "- Gesamtartikel: 285");
    assert_eq!(lines[6], "- Durchschnittliche Lieferzeit: 13.4 Tage");
    assert_eq!(lines[7], "- Schnellste Lieferung: 8 Tage");
    assert_eq!(lines[8], "- Langsamste Lieferung: 15 Tage");
    assert_eq!(lines[10], "Bestellübersicht:");
    assert!(report.ends_with('\n'));
    Ok(())
}

#[test]
fn table_dump_keeps_column_order_and_input_order() -> Result<()> {
    let output = run(&sample_orders(), Locale::De)?;
    let dump = order_table(&output.records, Locale::De.labels());
    let lines: Vec<&str> = dump.lines().filter(|l| !l.trim().is_empty()).collect();

    let header: Vec<&str> = lines[0].split_whitespace().collect();
    assert_eq!(
        header,
        vec![
            "Bestellnummer",
            "Artikel",
            "Menge",
            "Bestelldatum",
            "Lieferdatum",
            "Lieferzeit",
            "Lieferstatus"
        ]
    );

    let rows: Vec<Vec<&str>> = lines[1..]
        .iter()
        .map(|line| line.split_whitespace().collect())
        .collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(
        rows[0],
        vec!["12345", "Getriebe", "50", "01.01.2023", "15.01.2023", "14", "Ausgeliefert"]
    );
    let lead_times: Vec<&str> = rows.iter().map(|row| row[5]).collect();
    assert_eq!(lead_times, vec!["14", "8", "15", "15", "15"]);
    Ok(())
}

#[test]
fn english_labels_are_used_for_english_locale() -> Result<()> {
    let output = run(&sample_orders(), Locale::En)?;
    let lines = summary_lines(&output.summary, Locale::En.labels());
    assert_eq!(lines[2], "Average delivery time: 13.4 days");
    assert!(output.report.starts_with("Order and Production System Data Analysis\n"));
    assert!(output.report.contains("Order Overview:\n"));
    Ok(())
}

#[test]
fn report_is_identical_across_runs() -> Result<()> {
    let first = run(&sample_orders(), Locale::De)?;
    let second = run(&sample_orders(), Locale::De)?;
    assert_eq!(first.report, second.report);
    assert_eq!(
        render_report(&first.records, &first.summary, Locale::De),
        second.report
    );
    Ok(())
}

#[test]
fn console_text_mirrors_the_report_contents() -> Result<()> {
    let output = run(&sample_orders(), Locale::De)?;
    let console = output.console_text();
    assert!(console.starts_with("=== Kernkennzahlen ===\n"));
    assert!(console.contains("Durchschnittliche Lieferzeit: 13.4 Tage"));
    assert!(console.contains("=== Bestellungsübersicht mit Lieferzeit ==="));
    assert!(console.contains("Stoßdämpfer"));
    Ok(())
}
