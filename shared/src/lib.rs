use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fuel grade recorded for a fill-up. Serialized with the stored canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    #[serde(rename = "ETANOL")]
    Ethanol,
    #[serde(rename = "GASOLINA")]
    Gasoline,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Ethanol => write!(f, "ETANOL"),
            FuelType::Gasoline => write!(f, "GASOLINA"),
        }
    }
}

/// A fill-up exactly as the user entered it, shaped for the edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFuelEntry {
    pub id: String,
    /// Calendar date of the fill-up (YYYY-MM-DD, UTC)
    pub date: String,
    pub total_value: f64,
    pub price_per_liter: f64,
    /// Odometer reading when the tank was filled
    pub km_end: u64,
    pub fuel_type: FuelType,
    pub notes: String,
}

/// A fill-up enriched with the segment it starts (distance and efficiency up to the next fill-up)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFuelEntry {
    pub id: String,
    /// RFC 3339 timestamp (UTC)
    pub date: String,
    pub total_value: f64,
    pub price_per_liter: f64,
    pub km_end: u64,
    pub fuel_type: FuelType,
    pub notes: String,
    pub liters: f64,
    pub km_start: u64,
    /// Zero until the next fill-up is recorded
    pub distance: u64,
    pub avg_kmpl: f64,
}

/// Form payload for adding or editing a fill-up.
///
/// Numeric fields are taken as raw form text (JSON strings or numbers are both accepted)
/// and coerced by the backend; malformed values become zero instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SaveFuelEntryRequest {
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default, deserialize_with = "form_text")]
    pub total_value: String,
    #[serde(default, deserialize_with = "form_text")]
    pub price_per_liter: String,
    #[serde(default, deserialize_with = "form_text")]
    pub km_end: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<ProcessedFuelEntry>,
    /// Month filter applied (YYYY-MM), absent for "all months"
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FuelStatistics {
    pub total_spent: f64,
    pub total_distance: u64,
    pub total_liters: f64,
    pub average_kmpl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub current_mileage: u64,
    pub month: Option<String>,
    pub statistics: FuelStatistics,
    pub reminders: Vec<MaintenanceReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableMonthsResponse {
    /// Month keys (YYYY-MM), most recent first
    pub months: Vec<String>,
    pub current_month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummaryResponse {
    pub month: String,
    pub month_name: String,
    pub total_spent: f64,
    pub total_distance: u64,
    pub total_liters_purchased: f64,
    pub average_kmpl: f64,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageResponse {
    pub current_mileage: u64,
}

/// Odometer readings at the last service per category (0 = no record)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MaintenanceData {
    pub oil: u64,
    pub tires: u64,
    pub engine: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SaveMaintenanceRequest {
    #[serde(default, deserialize_with = "form_text")]
    pub oil: String,
    #[serde(default, deserialize_with = "form_text")]
    pub tires: String,
    #[serde(default, deserialize_with = "form_text")]
    pub engine: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Ok,
    Warning,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    /// oil | tires | engine
    pub category: String,
    pub name: String,
    pub last_service_km: u64,
    pub next_service_km: u64,
    pub status: MaintenanceStatus,
    /// Negative once overdue
    pub km_remaining: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceStatusResponse {
    pub current_mileage: u64,
    pub has_records: bool,
    pub items: Vec<MaintenanceReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthAnalysisRequest {
    /// YYYY-MM
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TripEstimateRequest {
    #[serde(default, deserialize_with = "form_text")]
    pub distance_km: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub text: String,
    /// False when `text` is a fallback message rather than generated content
    pub generated: bool,
}

/// Accept a form field sent either as a JSON string or a JSON number (or null).
pub fn form_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}
