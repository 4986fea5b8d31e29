//! Domain model for service records and maintenance status.
use serde::{Deserialize, Serialize};

/// Odometer reading at the last service of each category. Zero means "no record".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaintenanceData {
    pub oil: u64,
    pub tires: u64,
    pub engine: u64,
}

impl MaintenanceData {
    pub fn last_service_km(&self, category: MaintenanceCategory) -> u64 {
        match category {
            MaintenanceCategory::Oil => self.oil,
            MaintenanceCategory::Tires => self.tires,
            MaintenanceCategory::Engine => self.engine,
        }
    }

    pub fn has_records(&self) -> bool {
        MaintenanceCategory::ALL
            .iter()
            .any(|category| self.last_service_km(*category) > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaintenanceCategory {
    Oil,
    Tires,
    Engine,
}

impl MaintenanceCategory {
    pub const ALL: [MaintenanceCategory; 3] = [
        MaintenanceCategory::Oil,
        MaintenanceCategory::Tires,
        MaintenanceCategory::Engine,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MaintenanceCategory::Oil => "oil",
            MaintenanceCategory::Tires => "tires",
            MaintenanceCategory::Engine => "engine",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MaintenanceCategory::Oil => "Troca de Óleo",
            MaintenanceCategory::Tires => "Troca de Pneus",
            MaintenanceCategory::Engine => "Revisão do Motor",
        }
    }

    /// Service interval in km
    pub fn interval_km(&self) -> u64 {
        match self {
            MaintenanceCategory::Oil => 10_000,
            MaintenanceCategory::Tires => 25_000,
            MaintenanceCategory::Engine => 50_000,
        }
    }
}

/// When a category that is not yet overdue starts warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningPolicy {
    /// Warn once the vehicle is within this many km of the due mark
    LeadDistance(u64),
    /// Warn once this many km have been driven since the last service
    AbsoluteFloor(u64),
}

impl WarningPolicy {
    /// Odometer reading at which the warning starts
    pub fn warning_mark(&self, last_service_km: u64, interval_km: u64) -> u64 {
        match *self {
            WarningPolicy::LeadDistance(lead) => {
                last_service_km.saturating_add(interval_km).saturating_sub(lead)
            }
            WarningPolicy::AbsoluteFloor(floor) => last_service_km.saturating_add(floor),
        }
    }
}

/// One category's interval and warning policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceItem {
    pub category: MaintenanceCategory,
    pub interval_km: u64,
    pub warning: WarningPolicy,
}

impl MaintenanceItem {
    const fn new(category: MaintenanceCategory, interval_km: u64, warning: WarningPolicy) -> Self {
        Self { category, interval_km, warning }
    }
}

/// Reminder banner policy: lead distance before the due mark.
pub const REMINDER_POLICY: [MaintenanceItem; 3] = [
    MaintenanceItem::new(MaintenanceCategory::Oil, 10_000, WarningPolicy::LeadDistance(1_000)),
    MaintenanceItem::new(MaintenanceCategory::Tires, 25_000, WarningPolicy::LeadDistance(1_000)),
    MaintenanceItem::new(MaintenanceCategory::Engine, 50_000, WarningPolicy::LeadDistance(2_000)),
];

/// Detailed status view policy: km driven since the last service.
pub const DETAIL_POLICY: [MaintenanceItem; 3] = [
    MaintenanceItem::new(MaintenanceCategory::Oil, 10_000, WarningPolicy::AbsoluteFloor(9_000)),
    MaintenanceItem::new(MaintenanceCategory::Tires, 25_000, WarningPolicy::AbsoluteFloor(24_000)),
    MaintenanceItem::new(MaintenanceCategory::Engine, 50_000, WarningPolicy::AbsoluteFloor(48_000)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceStatus {
    Ok,
    Warning,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub category: MaintenanceCategory,
    pub last_service_km: u64,
    pub next_service_km: u64,
    pub status: MaintenanceStatus,
    /// Negative once overdue
    pub km_remaining: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policies_share_intervals() {
        for (reminder, detail) in REMINDER_POLICY.iter().zip(DETAIL_POLICY.iter()) {
            assert_eq!(reminder.category, detail.category);
            assert_eq!(reminder.interval_km, reminder.category.interval_km());
            assert_eq!(detail.interval_km, detail.category.interval_km());
        }
    }

    #[test]
    fn test_warning_marks() {
        assert_eq!(WarningPolicy::LeadDistance(1_000).warning_mark(130_000, 10_000), 139_000);
        assert_eq!(WarningPolicy::AbsoluteFloor(9_000).warning_mark(130_000, 10_000), 139_000);
        assert_eq!(WarningPolicy::LeadDistance(2_000).warning_mark(100_000, 50_000), 148_000);
        assert_eq!(WarningPolicy::AbsoluteFloor(24_000).warning_mark(100_000, 25_000), 124_000);
    }

    #[test]
    fn test_has_records() {
        assert!(!MaintenanceData::default().has_records());
        let data = MaintenanceData { oil: 0, tires: 5, engine: 0 };
        assert!(data.has_records());
        assert_eq!(data.last_service_km(MaintenanceCategory::Tires), 5);
    }
}
