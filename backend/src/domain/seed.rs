//! Starter dataset used when no stored entries can be loaded.
use chrono::NaiveDate;

use crate::domain::models::fuel_entry::{EntryTimestamp, FuelType, RawFuelEntry};

pub fn seed_entries() -> Vec<RawFuelEntry> {
    vec![
        // April 2024
        seed("1", (2024, 4, 12), 100.00, 6.19, 134_620, "Posto Shell"),
        seed("2", (2024, 4, 14), 100.00, 6.19, 134_843, ""),
        seed("3", (2024, 4, 16), 50.00, 5.89, 134_932, ""),
        // May 2024
        seed("4", (2024, 5, 22), 50.00, 6.19, 135_010, "Viagem"),
        seed("5", (2024, 5, 29), 273.82, 5.75, 135_193, ""),
    ]
}

fn seed(
    id: &str,
    (year, month, day): (i32, u32, u32),
    total_value: f64,
    price_per_liter: f64,
    km_end: u64,
    notes: &str,
) -> RawFuelEntry {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .map(EntryTimestamp::from_date)
        .unwrap_or_else(|| EntryTimestamp::new(0, 0));

    RawFuelEntry {
        id: id.to_string(),
        date,
        total_value,
        price_per_liter,
        km_end,
        fuel_type: FuelType::Gasoline,
        notes: notes.to_string(),
    }
}
