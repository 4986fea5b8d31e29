//! Form input handling for fill-ups and service records.
//!
//! User-entered numbers are normalized rather than rejected: the currency symbol,
//! spaces and a pt-BR decimal comma are cleaned up, the longest numeric prefix is
//! read, and anything left unparsable becomes zero. The date is the one field that
//! must be well formed.

use chrono::NaiveDate;

use crate::domain::commands::entries::SaveEntryCommand;
use crate::domain::commands::maintenance::SaveMaintenanceCommand;
use crate::domain::error::DomainError;
use crate::domain::models::fuel_entry::{EntryTimestamp, FuelType, RawFuelEntry};
use crate::domain::models::maintenance::MaintenanceData;

const CURRENCY_SYMBOL: &str = "R$";

/// Fields of a fill-up after coercion, ready to become a raw entry
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFields {
    pub date: EntryTimestamp,
    pub total_value: f64,
    pub price_per_liter: f64,
    pub km_end: u64,
    pub fuel_type: FuelType,
    pub notes: String,
}

impl EntryFields {
    pub fn into_entry(self, id: String) -> RawFuelEntry {
        RawFuelEntry {
            id,
            date: self.date,
            total_value: self.total_value,
            price_per_liter: self.price_per_liter,
            km_end: self.km_end,
            fuel_type: self.fuel_type,
            notes: self.notes,
        }
    }
}

/// Parse a decimal form value; malformed or negative input becomes 0.
pub fn parse_decimal(input: &str) -> f64 {
    let cleaned = clean_number(input);
    let value = numeric_prefix(&cleaned, true)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse an integer form value (odometer readings); fractional digits are dropped.
pub fn parse_whole(input: &str) -> u64 {
    let cleaned = clean_number(input);
    numeric_prefix(&cleaned, false)
        .and_then(|prefix| prefix.parse::<i64>().ok())
        .map(|value| value.max(0) as u64)
        .unwrap_or(0)
}

/// Parse a `YYYY-MM-DD` date into midnight UTC
pub fn parse_date(input: &str) -> Result<EntryTimestamp, DomainError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map(EntryTimestamp::from_date)
        .map_err(|_| DomainError::InvalidDate(input.to_string()))
}

/// Unknown fuel names fall back to gasoline, the form's default selection
pub fn parse_fuel_type(input: &str) -> FuelType {
    FuelType::parse(input).unwrap_or_default()
}

pub fn entry_fields(command: &SaveEntryCommand) -> Result<EntryFields, DomainError> {
    Ok(EntryFields {
        date: parse_date(&command.date)?,
        total_value: parse_decimal(&command.total_value),
        price_per_liter: parse_decimal(&command.price_per_liter),
        km_end: parse_whole(&command.km_end),
        fuel_type: parse_fuel_type(&command.fuel_type),
        notes: command.notes.clone().unwrap_or_default(),
    })
}

pub fn maintenance_data(command: &SaveMaintenanceCommand) -> MaintenanceData {
    MaintenanceData {
        oil: parse_whole(&command.oil),
        tires: parse_whole(&command.tires),
        engine: parse_whole(&command.engine),
    }
}

/// Strip the currency symbol and whitespace; a lone comma is the decimal separator.
fn clean_number(input: &str) -> String {
    let stripped: String = input
        .trim()
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if stripped.contains('.') {
        // "1,234.56": commas are grouping
        stripped.replace(',', "")
    } else {
        stripped.replacen(',', ".", 1)
    }
}

/// Longest leading slice that reads as a number (optional sign, digits, one dot).
fn numeric_prefix(input: &str, allow_fraction: bool) -> Option<&str> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (index, c) in input.char_indices() {
        match c {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if allow_fraction && !seen_dot => seen_dot = true,
            _ => break,
        }
        end = index + c.len_utf8();
    }

    if seen_digit {
        Some(input[..end].trim_end_matches('.'))
    } else {
        None
    }
}
