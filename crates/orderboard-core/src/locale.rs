use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Language of every user-visible label in the dashboard, report and console output.
///
/// Deserialization goes through [`FromStr`], so config files accept the same
/// spellings as the CLI and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    En,
    #[default]
    De,
}

/// Label set for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub html_lang: &'static str,
    pub dashboard_title: &'static str,
    pub report_title: &'static str,

    pub quantity_by_item: &'static str,
    pub lead_time_by_item: &'static str,
    pub lead_time_over_time: &'static str,
    pub volume_by_date: &'static str,

    pub item_axis: &'static str,
    pub quantity_axis: &'static str,
    pub lead_time_axis: &'static str,
    pub order_date_axis: &'static str,

    pub total_orders: &'static str,
    pub total_items: &'static str,
    pub average_lead_time_short: &'static str,
    pub average_lead_time: &'static str,
    pub fastest_delivery: &'static str,
    pub slowest_delivery: &'static str,
    pub delivery_status: &'static str,
    pub delivered: &'static str,
    pub days: &'static str,
    pub average_symbol: &'static str,

    pub key_metrics: &'static str,
    pub order_overview: &'static str,
    pub order_overview_with_lead_time: &'static str,

    pub order_id_header: &'static str,
    pub item_header: &'static str,
    pub quantity_header: &'static str,
    pub order_date_header: &'static str,
    pub delivery_date_header: &'static str,
    pub lead_time_header: &'static str,
    pub status_header: &'static str,
}

const GERMAN: Labels = Labels {
    html_lang: "de",
    dashboard_title: "Bestell- und Produktionssystem Dashboard",
    report_title: "Bestell- und Produktionssystem Datenanalyse",

    quantity_by_item: "Bestellmenge nach Artikeltyp",
    lead_time_by_item: "Lieferzeit nach Artikeltyp",
    lead_time_over_time: "Lieferzeit im Zeitverlauf",
    volume_by_date: "Bestellvolumen nach Datum",

    item_axis: "Artikel",
    quantity_axis: "Menge (Stk.)",
    lead_time_axis: "Lieferzeit (Tage)",
    order_date_axis: "Bestelldatum",

    total_orders: "Gesamtbestellungen",
    total_items: "Gesamtartikel",
    average_lead_time_short: "Ø Lieferzeit",
    average_lead_time: "Durchschnittliche Lieferzeit",
    fastest_delivery: "Schnellste Lieferung",
    slowest_delivery: "Langsamste Lieferung",
    delivery_status: "Lieferstatus",
    delivered: "Ausgeliefert",
    days: "Tage",
    average_symbol: "Ø",

    key_metrics: "Kernkennzahlen",
    order_overview: "Bestellübersicht",
    order_overview_with_lead_time: "Bestellungsübersicht mit Lieferzeit",

    order_id_header: "Bestellnummer",
    item_header: "Artikel",
    quantity_header: "Menge",
    order_date_header: "Bestelldatum",
    delivery_date_header: "Lieferdatum",
    lead_time_header: "Lieferzeit",
    status_header: "Lieferstatus",
};

const ENGLISH: Labels = Labels {
    html_lang: "en",
    dashboard_title: "Order and Production System Dashboard",
    report_title: "Order and Production System Data Analysis",

    quantity_by_item: "Order Quantity by Item Type",
    lead_time_by_item: "Delivery Time by Item Type",
    lead_time_over_time: "Delivery Time over Time",
    volume_by_date: "Order Volume by Date",

    item_axis: "Item",
    quantity_axis: "Quantity (pcs)",
    lead_time_axis: "Delivery Time (days)",
    order_date_axis: "Order Date",

    total_orders: "Total Orders",
    total_items: "Total Items",
    average_lead_time_short: "Avg. Delivery Time",
    average_lead_time: "Average delivery time",
    fastest_delivery: "Fastest delivery",
    slowest_delivery: "Slowest delivery",
    delivery_status: "Delivery Status",
    delivered: "Delivered",
    days: "days",
    average_symbol: "Avg.",

    key_metrics: "Key Metrics",
    order_overview: "Order Overview",
    order_overview_with_lead_time: "Order Overview with Delivery Time",

    order_id_header: "Order ID",
    item_header: "Item",
    quantity_header: "Quantity",
    order_date_header: "Order Date",
    delivery_date_header: "Delivery Date",
    lead_time_header: "Delivery Time",
    status_header: "Status",
};

impl Locale {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::En => &ENGLISH,
            Locale::De => &GERMAN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "de" | "german" | "deutsch" => Ok(Locale::De),
            other => Err(ReportError::UnknownLocale(other.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
