//! Maintenance monitor: due / warning / overdue status per service category.
//!
//! Two presentations evaluate the same interval math with different warning
//! policies: the reminder banner (`REMINDER_POLICY`, lead distance before the due
//! mark) and the detailed status view (`DETAIL_POLICY`, km driven since the last
//! service). Both tables are kept as-is; callers choose one explicitly.

use log::debug;

use crate::domain::models::maintenance::{
    MaintenanceData, MaintenanceItem, MaintenanceReport, MaintenanceStatus, WarningPolicy,
    DETAIL_POLICY, REMINDER_POLICY,
};

/// Status of one category against the current mileage.
///
/// Returns `None` when `last_service_km` is 0: there is no record, so the category is
/// left out entirely rather than reported as OK.
pub fn evaluate(
    current_mileage: u64,
    last_service_km: u64,
    interval_km: u64,
    warning: WarningPolicy,
) -> Option<(MaintenanceStatus, i64)> {
    if last_service_km == 0 {
        return None;
    }

    let next_service_km = last_service_km.saturating_add(interval_km);
    let km_remaining = signed_difference(next_service_km, current_mileage);

    let status = if current_mileage >= next_service_km {
        MaintenanceStatus::Overdue
    } else if current_mileage >= warning.warning_mark(last_service_km, interval_km) {
        MaintenanceStatus::Warning
    } else {
        MaintenanceStatus::Ok
    };

    Some((status, km_remaining))
}

/// `a - b` as a signed distance, clamped to the `i64` range
fn signed_difference(a: u64, b: u64) -> i64 {
    if a >= b {
        i64::try_from(a - b).unwrap_or(i64::MAX)
    } else {
        i64::try_from(b - a).map(|d| -d).unwrap_or(i64::MIN)
    }
}

/// Human-readable remaining/overdue distance
pub fn status_message(status: MaintenanceStatus, km_remaining: i64) -> String {
    match status {
        MaintenanceStatus::Overdue => format!("overdue by {} km", km_remaining.unsigned_abs()),
        MaintenanceStatus::Warning | MaintenanceStatus::Ok => format!("{} km remaining", km_remaining),
    }
}

/// Evaluate every recorded category under the given policy table
pub fn evaluate_all(
    current_mileage: u64,
    data: &MaintenanceData,
    policy: &[MaintenanceItem],
) -> Vec<MaintenanceReport> {
    policy
        .iter()
        .filter_map(|item| {
            let last_service_km = data.last_service_km(item.category);
            let (status, km_remaining) =
                evaluate(current_mileage, last_service_km, item.interval_km, item.warning)?;
            Some(MaintenanceReport {
                category: item.category,
                last_service_km,
                next_service_km: last_service_km.saturating_add(item.interval_km),
                status,
                km_remaining,
                message: status_message(status, km_remaining),
            })
        })
        .collect()
}

/// Reminder banner: only categories needing attention. Empty while mileage is unknown.
pub fn reminders(current_mileage: u64, data: &MaintenanceData) -> Vec<MaintenanceReport> {
    if current_mileage == 0 {
        return Vec::new();
    }

    let reminders: Vec<MaintenanceReport> = evaluate_all(current_mileage, data, &REMINDER_POLICY)
        .into_iter()
        .filter(|report| report.status != MaintenanceStatus::Ok)
        .collect();

    debug!("{} maintenance reminders at {} km", reminders.len(), current_mileage);
    reminders
}

/// Detailed status view: every recorded category, OK ones included
pub fn detailed_status(current_mileage: u64, data: &MaintenanceData) -> Vec<MaintenanceReport> {
    evaluate_all(current_mileage, data, &DETAIL_POLICY)
}
