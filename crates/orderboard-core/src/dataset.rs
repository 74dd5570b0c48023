use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::Result;
use crate::model::RawOrder;

const DELIVERED: &str = "Ausgeliefert";

/// The fixed five-order sample the dashboard is built from when no input file is given.
pub fn sample_orders() -> Vec<RawOrder> {
    vec![
        RawOrder::new(12345, "Getriebe", 50, "01.01.2023", "15.01.2023", DELIVERED),
        RawOrder::new(12346, "Motoröl", 100, "02.01.2023", "10.01.2023", DELIVERED),
        RawOrder::new(12347, "Bremsbeläge", 25, "05.01.2023", "20.01.2023", DELIVERED),
        RawOrder::new(12348, "Reifen", 80, "10.01.2023", "25.01.2023", DELIVERED),
        RawOrder::new(12349, "Stoßdämpfer", 30, "15.01.2023", "30.01.2023", DELIVERED),
    ]
}

/// Reads orders from a CSV file with the header
/// `order_id,item_name,quantity,order_date,delivery_date,status`.
pub fn load_csv(path: &Path) -> Result<Vec<RawOrder>> {
    let file = File::open(path)?;
    let orders = read_csv(file)?;
    debug!(path = %path.display(), orders = orders.len(), "Loaded orders from CSV");
    Ok(orders)
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawOrder>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut orders = Vec::new();
    for row in reader.deserialize() {
        let order: RawOrder = row?;
        orders.push(order);
    }
    Ok(orders)
}
