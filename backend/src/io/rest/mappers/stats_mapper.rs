use crate::domain::statistics::{MonthSummary, Statistics};
use shared::{FuelStatistics, MonthSummaryResponse};

pub struct StatsMapper;

impl StatsMapper {
    pub fn to_dto(statistics: Statistics) -> FuelStatistics {
        FuelStatistics {
            total_spent: statistics.total_spent,
            total_distance: statistics.total_distance,
            total_liters: statistics.total_liters,
            average_kmpl: statistics.average_kmpl,
        }
    }

    pub fn to_summary_dto(summary: MonthSummary) -> MonthSummaryResponse {
        MonthSummaryResponse {
            month: summary.month.to_string(),
            month_name: summary.month.month_name().to_string(),
            total_spent: summary.statistics.total_spent,
            total_distance: summary.statistics.total_distance,
            total_liters_purchased: summary.total_liters_purchased,
            average_kmpl: summary.statistics.average_kmpl,
            entry_count: summary.entry_count,
        }
    }
}
