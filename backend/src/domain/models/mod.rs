pub mod fuel_entry;
pub mod maintenance;
pub mod session;
