//! # CSV Fuel Entry Repository
//!
//! Stores every fill-up in `{data_directory}/fuel_entries.csv`.
//!
//! The date is kept as two integer columns (epoch seconds and the nanosecond
//! remainder) so a save/load cycle reproduces it exactly. Amounts are written with
//! Rust's shortest round-trip float formatting.
//!
//! A missing file means "nothing stored yet"; a file that cannot be parsed is an
//! error and is left untouched for the caller to decide what to do.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use csv::{Reader, StringRecord, Writer};
use log::{debug, info};

use super::connection::CsvConnection;
use crate::domain::models::fuel_entry::{EntryTimestamp, FuelType, RawFuelEntry};
use crate::storage::traits::FuelEntryStorage;

const HEADER: [&str; 8] = [
    "id",
    "date_seconds",
    "date_nanoseconds",
    "total_value",
    "price_per_liter",
    "km_end",
    "fuel_type",
    "notes",
];

/// CSV-based fuel entry repository
#[derive(Clone)]
pub struct FuelEntryRepository {
    connection: CsvConnection,
}

impl FuelEntryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn parse_record(record: &StringRecord, line: u64) -> Result<RawFuelEntry> {
        let field = |index: usize| -> Result<&str> {
            record
                .get(index)
                .ok_or_else(|| anyhow!("line {}: missing column '{}'", line, HEADER[index]))
        };

        let fuel_name = field(6)?;
        let fuel_type = FuelType::parse(fuel_name)
            .ok_or_else(|| anyhow!("line {}: unknown fuel type '{}'", line, fuel_name))?;

        Ok(RawFuelEntry {
            id: field(0)?.to_string(),
            date: EntryTimestamp::new(
                field(1)?.parse().with_context(|| format!("line {}: bad date_seconds", line))?,
                field(2)?.parse().with_context(|| format!("line {}: bad date_nanoseconds", line))?,
            ),
            total_value: field(3)?.parse().with_context(|| format!("line {}: bad total_value", line))?,
            price_per_liter: field(4)?
                .parse()
                .with_context(|| format!("line {}: bad price_per_liter", line))?,
            km_end: field(5)?.parse().with_context(|| format!("line {}: bad km_end", line))?,
            fuel_type,
            notes: field(7)?.to_string(),
        })
    }

    fn read_entries(&self) -> Result<Option<Vec<RawFuelEntry>>> {
        let file_path = self.connection.entries_file_path();
        if !file_path.exists() {
            debug!("No entries file at {}", file_path.display());
            return Ok(None);
        }

        let mut csv_reader = Reader::from_path(&file_path)?;
        let headers = csv_reader.headers()?.clone();
        if headers.iter().ne(HEADER.iter().copied()) {
            return Err(anyhow!("unexpected header in {}", file_path.display()));
        }

        let mut entries = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            entries.push(Self::parse_record(&record, index as u64 + 2)?);
        }

        info!("Loaded {} fuel entries from {}", entries.len(), file_path.display());
        Ok(Some(entries))
    }

    fn write_entries(&self, entries: &[RawFuelEntry]) -> Result<()> {
        let mut csv_writer = Writer::from_writer(Vec::new());
        csv_writer.write_record(HEADER)?;

        for entry in entries {
            csv_writer.write_record([
                entry.id.as_str(),
                &entry.date.seconds.to_string(),
                &entry.date.nanoseconds.to_string(),
                &entry.total_value.to_string(),
                &entry.price_per_liter.to_string(),
                &entry.km_end.to_string(),
                entry.fuel_type.as_str(),
                entry.notes.as_str(),
            ])?;
        }

        let bytes = csv_writer.into_inner().map_err(|e| anyhow!("{}", e.error()))?;
        let file_path = self.connection.entries_file_path();
        self.connection.write_atomically(&file_path, &bytes)?;

        info!("Saved {} fuel entries to {}", entries.len(), file_path.display());
        Ok(())
    }
}

#[async_trait]
impl FuelEntryStorage for FuelEntryRepository {
    async fn load_entries(&self) -> Result<Option<Vec<RawFuelEntry>>> {
        self.read_entries()
    }

    async fn save_entries(&self, entries: &[RawFuelEntry]) -> Result<()> {
        self.write_entries(entries)
    }
}
