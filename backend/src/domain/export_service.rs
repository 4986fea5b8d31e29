//! Export of the raw fill-up log as a spreadsheet-friendly CSV file.
//!
//! Rows are written oldest first. Only the notes column is quoted; the other
//! columns never contain a delimiter. A UTF-8 byte-order marker is prepended so
//! spreadsheet tools pick the right encoding for accented notes.

use log::info;

use crate::domain::error::DomainError;
use crate::domain::models::fuel_entry::RawFuelEntry;

pub const EXPORT_FILE_NAME: &str = "meu_combustivel_export.csv";
const BYTE_ORDER_MARK: char = '\u{FEFF}';
const HEADER: &str = "id,date,totalValue,pricePerLiter,kmEnd,fuelType,notes";

/// A ready-to-download export file
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub file_name: String,
    pub content: String,
    pub entry_count: usize,
}

/// Serialize raw entries, sorted by date only, to delimited text.
pub fn to_delimited_text(entries: &[RawFuelEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(HEADER.to_string());

    let mut sorted: Vec<&RawFuelEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.date);

    for entry in sorted {
        lines.push(format!(
            "{},{},{:.2},{:.3},{},{},\"{}\"",
            entry.id,
            entry.date.date().format("%Y-%m-%d"),
            entry.total_value,
            entry.price_per_liter,
            entry.km_end,
            entry.fuel_type.as_str(),
            entry.notes.replace('"', "\"\"")
        ));
    }

    let mut content = String::new();
    content.push(BYTE_ORDER_MARK);
    content.push_str(&lines.join("\n"));
    content
}

/// Build the export file, refusing when there is nothing to export
pub fn export_csv(entries: &[RawFuelEntry]) -> Result<ExportPayload, DomainError> {
    if entries.is_empty() {
        return Err(DomainError::NothingToExport);
    }

    let content = to_delimited_text(entries);
    info!(
        "📄 EXPORT: generated {} rows ({} bytes) as {}",
        entries.len(),
        content.len(),
        EXPORT_FILE_NAME
    );

    Ok(ExportPayload {
        file_name: EXPORT_FILE_NAME.to_string(),
        content,
        entry_count: entries.len(),
    })
}
