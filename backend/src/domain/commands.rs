//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod entries {
    use crate::domain::models::fuel_entry::ProcessedFuelEntry;
    use crate::domain::statistics::MonthFilter;

    /// Raw form input for adding or editing a fill-up.
    #[derive(Debug, Clone, Default)]
    pub struct SaveEntryCommand {
        pub date: String,
        pub total_value: String,
        pub price_per_liter: String,
        pub km_end: String,
        pub fuel_type: String,
        pub notes: Option<String>,
    }

    /// Query for the processed entry list.
    #[derive(Debug, Clone, Copy)]
    pub struct EntryListQuery {
        pub filter: MonthFilter,
    }

    /// Processed entries, most recent first.
    #[derive(Debug, Clone)]
    pub struct EntryListResult {
        pub entries: Vec<ProcessedFuelEntry>,
        pub filter: MonthFilter,
    }
}

pub mod maintenance {
    use crate::domain::models::maintenance::MaintenanceReport;

    /// Raw form input for the last-service readings.
    #[derive(Debug, Clone, Default)]
    pub struct SaveMaintenanceCommand {
        pub oil: String,
        pub tires: String,
        pub engine: String,
    }

    /// Per-category detail for the maintenance view.
    #[derive(Debug, Clone)]
    pub struct MaintenanceStatusResult {
        pub current_mileage: u64,
        pub has_records: bool,
        pub reports: Vec<MaintenanceReport>,
    }
}

pub mod dashboard {
    use crate::domain::models::maintenance::MaintenanceReport;
    use crate::domain::statistics::{MonthFilter, Statistics};

    /// Data behind the statistics cards and the reminder banner.
    #[derive(Debug, Clone)]
    pub struct DashboardResult {
        pub current_mileage: u64,
        pub filter: MonthFilter,
        pub statistics: Statistics,
        pub reminders: Vec<MaintenanceReport>,
    }
}
