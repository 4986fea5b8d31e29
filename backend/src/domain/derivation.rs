//! Derivation of trip segments from raw fill-ups.
//!
//! Raw entries are sorted by `(date, km_end)` and each fill-up is paired with the
//! chronologically next one. The pair bounds a driving segment: the distance is the
//! odometer delta and the efficiency is that distance over the liters bought at the
//! earlier fill-up. The most recent fill-up has no next entry yet, so its segment
//! stays at zero until another fill-up is recorded.
//!
//! The whole sequence is recomputed on every call; there is no incremental state.

use crate::domain::models::fuel_entry::{ProcessedFuelEntry, RawFuelEntry};

/// Sort entries ascending by `(date, km_end)`.
///
/// The sort is stable, so entries sharing both keys keep their input order.
pub fn chronological_order(entries: &[RawFuelEntry]) -> Vec<&RawFuelEntry> {
    let mut sorted: Vec<&RawFuelEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.km_end.cmp(&b.km_end)));
    sorted
}

/// Derive the processed sequence, oldest first.
pub fn derive_entries(entries: &[RawFuelEntry]) -> Vec<ProcessedFuelEntry> {
    let sorted = chronological_order(entries);

    sorted
        .iter()
        .enumerate()
        .map(|(index, current)| {
            let next = sorted.get(index + 1).copied();
            process_entry(current, next)
        })
        .collect()
}

/// Derive the processed sequence, most recent first (display order).
pub fn derive_for_display(entries: &[RawFuelEntry]) -> Vec<ProcessedFuelEntry> {
    let mut processed = derive_entries(entries);
    processed.reverse();
    processed
}

fn process_entry(current: &RawFuelEntry, next: Option<&RawFuelEntry>) -> ProcessedFuelEntry {
    let km_start = current.km_end;
    let liters = current.liters();

    // Non-increasing readings (resets, typos) mean "no distance data", not an error
    let distance = match next {
        Some(next) if next.km_end > km_start => next.km_end - km_start,
        _ => 0,
    };

    let avg_kmpl = if distance > 0 && liters > 0.0 {
        distance as f64 / liters
    } else {
        0.0
    };

    ProcessedFuelEntry {
        id: current.id.clone(),
        date: current.date.to_datetime(),
        total_value: current.total_value,
        price_per_liter: current.price_per_liter,
        km_end: current.km_end,
        fuel_type: current.fuel_type,
        notes: current.notes.clone(),
        liters,
        km_start,
        distance,
        avg_kmpl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::fuel_entry::{EntryTimestamp, FuelType};
    use chrono::NaiveDate;

    fn entry(id: &str, date: (i32, u32, u32), km_end: u64, total: f64, price: f64) -> RawFuelEntry {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        RawFuelEntry {
            id: id.to_string(),
            date: EntryTimestamp::from_date(date),
            total_value: total,
            price_per_liter: price,
            km_end,
            fuel_type: FuelType::Gasoline,
            notes: String::new(),
        }
    }

    fn april_entries() -> Vec<RawFuelEntry> {
        vec![
            entry("1", (2024, 4, 12), 134620, 100.00, 6.19),
            entry("2", (2024, 4, 14), 134843, 100.00, 6.19),
            entry("3", (2024, 4, 16), 134932, 50.00, 5.89),
        ]
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_entries(&[]).is_empty());
        assert!(derive_for_display(&[]).is_empty());
    }

    #[test]
    fn test_single_entry_has_no_segment() {
        let processed = derive_entries(&[entry("1", (2024, 4, 12), 134620, 100.0, 6.19)]);
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].distance, 0);
        assert_eq!(processed[0].avg_kmpl, 0.0);
        assert_eq!(processed[0].km_start, 134620);
        assert!((processed[0].liters - 16.155).abs() < 0.001);
    }

    #[test]
    fn test_april_scenario() {
        let processed = derive_entries(&april_entries());

        assert_eq!(processed[0].id, "1");
        assert!((processed[0].liters - 16.16).abs() < 0.01);
        assert_eq!(processed[0].distance, 223);
        assert!((processed[0].avg_kmpl - 13.80).abs() < 0.01);

        assert_eq!(processed[1].id, "2");
        assert_eq!(processed[1].distance, 89);
        assert!((processed[1].liters - 16.16).abs() < 0.01);
        assert!((processed[1].avg_kmpl - 5.51).abs() < 0.01);

        assert_eq!(processed[2].id, "3");
        assert_eq!(processed[2].distance, 0);
        assert_eq!(processed[2].avg_kmpl, 0.0);
    }

    #[test]
    fn test_display_order_is_most_recent_first() {
        let processed = derive_for_display(&april_entries());
        let ids: Vec<&str> = processed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(processed[2].distance, 223);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let ordered = april_entries();
        let mut shuffled = april_entries();
        shuffled.swap(0, 2);
        shuffled.swap(1, 2);

        assert_eq!(derive_entries(&ordered), derive_entries(&shuffled));
        assert_eq!(derive_entries(&ordered), derive_entries(&ordered));
    }

    #[test]
    fn test_same_day_fill_ups_ordered_by_odometer() {
        let entries = vec![
            entry("b", (2024, 5, 1), 1200, 50.0, 5.0),
            entry("a", (2024, 5, 1), 1000, 50.0, 5.0),
            entry("c", (2024, 5, 2), 1500, 50.0, 5.0),
        ];
        let processed = derive_entries(&entries);
        let ids: Vec<&str> = processed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(processed[0].distance, 200);
        assert_eq!(processed[1].distance, 300);
    }

    #[test]
    fn test_duplicate_keys_keep_input_order() {
        let entries = vec![
            entry("first", (2024, 5, 1), 1000, 10.0, 5.0),
            entry("second", (2024, 5, 1), 1000, 20.0, 5.0),
        ];
        let processed = derive_entries(&entries);
        assert_eq!(processed[0].id, "first");
        assert_eq!(processed[1].id, "second");
        assert_eq!(processed[0].distance, 0);
    }

    #[test]
    fn test_odometer_reset_yields_zero_distance() {
        let entries = vec![
            entry("1", (2024, 5, 1), 5000, 50.0, 5.0),
            entry("2", (2024, 5, 2), 100, 50.0, 5.0),
            entry("3", (2024, 5, 3), 400, 50.0, 5.0),
        ];
        let processed = derive_entries(&entries);
        assert_eq!(processed[0].distance, 0);
        assert_eq!(processed[0].avg_kmpl, 0.0);
        assert_eq!(processed[1].distance, 300);
        assert_eq!(processed[1].avg_kmpl, 30.0);
    }

    #[test]
    fn test_zero_price_zeroes_liters_and_efficiency() {
        let entries = vec![
            entry("1", (2024, 5, 1), 1000, 80.0, 0.0),
            entry("2", (2024, 5, 2), 1300, 50.0, 5.0),
        ];
        let processed = derive_entries(&entries);
        assert_eq!(processed[0].liters, 0.0);
        assert_eq!(processed[0].distance, 300);
        assert_eq!(processed[0].avg_kmpl, 0.0);
    }

    #[test]
    fn test_cardinality_and_adjacent_distance_law() {
        let entries = vec![
            entry("1", (2024, 1, 5), 1000, 100.0, 5.0),
            entry("2", (2024, 1, 1), 800, 100.0, 5.0),
            entry("3", (2024, 2, 1), 1700, 100.0, 5.0),
            entry("4", (2024, 1, 20), 1650, 100.0, 5.0),
            entry("5", (2024, 3, 1), 1600, 100.0, 5.0),
        ];
        let processed = derive_entries(&entries);
        assert_eq!(processed.len(), entries.len());

        for pair in processed.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.km_end > a.km_end {
                assert_eq!(a.distance, b.km_end - a.km_end);
            } else {
                assert_eq!(a.distance, 0);
            }
        }
        let last = processed.last().unwrap();
        assert_eq!(last.distance, 0);
        assert_eq!(last.avg_kmpl, 0.0);
    }
}
