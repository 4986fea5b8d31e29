//! Domain model for a fill-up and its derived segment.
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point instant: whole epoch seconds plus a nanosecond remainder.
///
/// Stored as two integers so a save/load cycle never drifts the way a floating-point
/// epoch would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl EntryTimestamp {
    pub fn new(seconds: i64, nanoseconds: u32) -> Self {
        Self { seconds, nanoseconds }
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self {
            seconds: datetime.timestamp(),
            nanoseconds: datetime.timestamp_subsec_nanos(),
        }
    }

    /// Midnight UTC of the given calendar day
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_datetime(Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
    }

    /// Out-of-range values collapse to the epoch rather than panicking
    pub fn to_datetime(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.seconds, self.nanoseconds)
            .single()
            .unwrap_or_default()
    }

    pub fn date(&self) -> NaiveDate {
        self.to_datetime().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Ethanol,
    Gasoline,
}

impl FuelType {
    /// Canonical stored/exported name
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Ethanol => "ETANOL",
            FuelType::Gasoline => "GASOLINA",
        }
    }

    /// Parse a canonical or English fuel name, ignoring case
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ETANOL" | "ETHANOL" => Some(FuelType::Ethanol),
            "GASOLINA" | "GASOLINE" => Some(FuelType::Gasoline),
            _ => None,
        }
    }
}

impl Default for FuelType {
    fn default() -> Self {
        FuelType::Gasoline
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single refueling event as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFuelEntry {
    pub id: String,
    pub date: EntryTimestamp,
    pub total_value: f64,
    pub price_per_liter: f64,
    /// Odometer reading at the moment of this fill-up
    pub km_end: u64,
    pub fuel_type: FuelType,
    pub notes: String,
}

impl RawFuelEntry {
    /// Generate an entry ID from the creation time
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("fillup::{}", epoch_millis)
    }

    /// Liters bought, or zero when the price is missing
    pub fn liters(&self) -> f64 {
        if self.price_per_liter > 0.0 {
            self.total_value / self.price_per_liter
        } else {
            0.0
        }
    }
}

/// A raw entry placed in its chronological sequence, with the segment it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFuelEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub total_value: f64,
    pub price_per_liter: f64,
    pub km_end: u64,
    pub fuel_type: FuelType,
    pub notes: String,
    pub liters: f64,
    pub km_start: u64,
    pub distance: u64,
    pub avg_kmpl: f64,
}
