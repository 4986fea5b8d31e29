use crate::domain::commands::entries::SaveEntryCommand;
use crate::domain::models::fuel_entry::{
    FuelType as DomainFuelType, ProcessedFuelEntry as DomainProcessedEntry,
    RawFuelEntry as DomainRawEntry,
};
use shared::{
    FuelType as SharedFuelType, ProcessedFuelEntry as SharedProcessedEntry,
    RawFuelEntry as SharedRawEntry, SaveFuelEntryRequest,
};

pub struct FuelEntryMapper;

impl FuelEntryMapper {
    pub fn to_raw_dto(domain: DomainRawEntry) -> SharedRawEntry {
        SharedRawEntry {
            date: domain.date.date().format("%Y-%m-%d").to_string(),
            id: domain.id,
            total_value: domain.total_value,
            price_per_liter: domain.price_per_liter,
            km_end: domain.km_end,
            fuel_type: Self::to_dto_type(domain.fuel_type),
            notes: domain.notes,
        }
    }

    pub fn to_processed_dto(domain: DomainProcessedEntry) -> SharedProcessedEntry {
        SharedProcessedEntry {
            id: domain.id,
            date: domain.date.to_rfc3339(),
            total_value: domain.total_value,
            price_per_liter: domain.price_per_liter,
            km_end: domain.km_end,
            fuel_type: Self::to_dto_type(domain.fuel_type),
            notes: domain.notes,
            liters: domain.liters,
            km_start: domain.km_start,
            distance: domain.distance,
            avg_kmpl: domain.avg_kmpl,
        }
    }

    pub fn to_command(request: SaveFuelEntryRequest) -> SaveEntryCommand {
        SaveEntryCommand {
            date: request.date,
            total_value: request.total_value,
            price_per_liter: request.price_per_liter,
            km_end: request.km_end,
            fuel_type: request.fuel_type,
            notes: request.notes,
        }
    }

    fn to_dto_type(domain_type: DomainFuelType) -> SharedFuelType {
        match domain_type {
            DomainFuelType::Ethanol => SharedFuelType::Ethanol,
            DomainFuelType::Gasoline => SharedFuelType::Gasoline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::derivation::derive_for_display;
    use crate::domain::seed::seed_entries;

    #[test]
    fn test_raw_dto_uses_calendar_date() {
        let dto = FuelEntryMapper::to_raw_dto(seed_entries().remove(0));
        assert_eq!(dto.id, "1");
        assert_eq!(dto.date, "2024-04-12");
        assert_eq!(dto.fuel_type, SharedFuelType::Gasoline);
        assert_eq!(dto.notes, "Posto Shell");
    }

    #[test]
    fn test_processed_dto_carries_segment() {
        let latest_first = derive_for_display(&seed_entries());
        let dto = FuelEntryMapper::to_processed_dto(latest_first[4].clone());
        assert_eq!(dto.id, "1");
        assert_eq!(dto.date, "2024-04-12T00:00:00+00:00");
        assert_eq!(dto.distance, 223);
        assert_eq!(dto.km_start, 134_620);
    }
}
