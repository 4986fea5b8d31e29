pub mod fuel_entry_mapper;
pub mod maintenance_mapper;
pub mod stats_mapper;

pub use fuel_entry_mapper::FuelEntryMapper;
pub use maintenance_mapper::MaintenanceMapper;
pub use stats_mapper::StatsMapper;
