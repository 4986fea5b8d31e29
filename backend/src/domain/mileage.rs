//! Current odometer reading of the vehicle.
use crate::domain::models::fuel_entry::RawFuelEntry;

/// Highest odometer reading across all fill-ups, or 0 with no fill-ups.
///
/// This is the reading maintenance status is measured against and the "last known
/// mileage" hint offered by the add-entry form.
pub fn current_mileage(entries: &[RawFuelEntry]) -> u64 {
    entries.iter().map(|e| e.km_end).max().unwrap_or(0)
}
