//! Aggregate statistics and calendar-month grouping over processed fill-ups.
//!
//! Spend counts every fill-up, but distance, liters and the average efficiency only
//! count fill-ups whose segment is already known (`distance > 0`). A fill-up whose
//! next entry has not been recorded yet would otherwise add liters with no distance
//! and drag the average down.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::models::fuel_entry::ProcessedFuelEntry;

/// Calendar month in UTC, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of_datetime(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `YYYY-MM`
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// Lower-case pt-BR month name, as shown on the month summary card
    pub fn month_name(&self) -> &'static str {
        match self.month {
            1 => "janeiro",
            2 => "fevereiro",
            3 => "março",
            4 => "abril",
            5 => "maio",
            6 => "junho",
            7 => "julho",
            8 => "agosto",
            9 => "setembro",
            10 => "outubro",
            11 => "novembro",
            12 => "dezembro",
            _ => "mês inválido",
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Month selector value: every entry, or a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Month(MonthKey),
}

impl MonthFilter {
    /// `None`, "all" or anything unparsable selects every month
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(MonthKey::parse)
            .map(MonthFilter::Month)
            .unwrap_or(MonthFilter::All)
    }

    pub fn month(&self) -> Option<MonthKey> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Month(key) => Some(*key),
        }
    }

    pub fn matches(&self, entry: &ProcessedFuelEntry) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(key) => MonthKey::of_datetime(&entry.date) == *key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub total_spent: f64,
    pub total_distance: u64,
    pub total_liters: f64,
    pub average_kmpl: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub statistics: Statistics,
    /// Liters bought across every fill-up of the month, known segment or not
    pub total_liters_purchased: f64,
    pub entry_count: usize,
}

/// Summary statistics over any subset of processed entries.
pub fn aggregate(entries: &[ProcessedFuelEntry]) -> Statistics {
    let total_spent: f64 = entries.iter().map(|e| e.total_value).sum();

    let (total_distance, total_liters) = entries
        .iter()
        .filter(|e| e.distance > 0)
        .fold((0u64, 0.0f64), |(distance, liters), e| {
            (distance.saturating_add(e.distance), liters + e.liters)
        });

    let average_kmpl = if total_liters > 0.0 {
        total_distance as f64 / total_liters
    } else {
        0.0
    };

    Statistics {
        total_spent,
        total_distance,
        total_liters,
        average_kmpl,
    }
}

/// Entries selected by the month filter, preserving their order
pub fn filter_by_month(entries: &[ProcessedFuelEntry], filter: MonthFilter) -> Vec<ProcessedFuelEntry> {
    entries.iter().filter(|e| filter.matches(e)).cloned().collect()
}

/// Group entries by UTC calendar month; each group keeps the input order
pub fn group_by_month(entries: &[ProcessedFuelEntry]) -> BTreeMap<MonthKey, Vec<ProcessedFuelEntry>> {
    let mut groups: BTreeMap<MonthKey, Vec<ProcessedFuelEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(MonthKey::of_datetime(&entry.date))
            .or_default()
            .push(entry.clone());
    }
    groups
}

/// Months offered by the selector, most recent first. Always includes `current`.
pub fn available_months(entries: &[ProcessedFuelEntry], current: MonthKey) -> Vec<MonthKey> {
    let mut months: Vec<MonthKey> = group_by_month(entries).into_keys().collect();
    if !months.contains(&current) {
        months.push(current);
    }
    months.sort_by(|a, b| b.cmp(a));
    months
}

/// Summary card for one month; `None` when the month has no fill-ups.
///
/// The average uses the same known-segment rule as [`aggregate`], so it differs from
/// a plain "distance over every liter bought this month" figure whenever the month
/// holds the latest fill-up. Those purchased liters are reported separately in
/// `total_liters_purchased`.
pub fn month_summary(entries: &[ProcessedFuelEntry], month: MonthKey) -> Option<MonthSummary> {
    let selected = filter_by_month(entries, MonthFilter::Month(month));
    if selected.is_empty() {
        return None;
    }

    Some(MonthSummary {
        month,
        statistics: aggregate(&selected),
        total_liters_purchased: selected.iter().map(|e| e.liters).sum(),
        entry_count: selected.len(),
    })
}
