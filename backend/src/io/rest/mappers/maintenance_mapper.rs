use crate::domain::commands::maintenance::SaveMaintenanceCommand;
use crate::domain::models::maintenance::{
    MaintenanceData as DomainMaintenanceData, MaintenanceReport as DomainReport,
    MaintenanceStatus as DomainStatus,
};
use shared::{
    MaintenanceData as SharedMaintenanceData, MaintenanceReport as SharedReport,
    MaintenanceStatus as SharedStatus, SaveMaintenanceRequest,
};

pub struct MaintenanceMapper;

impl MaintenanceMapper {
    pub fn to_dto(domain: DomainMaintenanceData) -> SharedMaintenanceData {
        SharedMaintenanceData {
            oil: domain.oil,
            tires: domain.tires,
            engine: domain.engine,
        }
    }

    pub fn to_command(request: SaveMaintenanceRequest) -> SaveMaintenanceCommand {
        SaveMaintenanceCommand {
            oil: request.oil,
            tires: request.tires,
            engine: request.engine,
        }
    }

    pub fn to_report_dto(domain: DomainReport) -> SharedReport {
        SharedReport {
            category: domain.category.key().to_string(),
            name: domain.category.display_name().to_string(),
            last_service_km: domain.last_service_km,
            next_service_km: domain.next_service_km,
            status: Self::to_dto_status(domain.status),
            km_remaining: domain.km_remaining,
            message: domain.message,
        }
    }

    pub fn to_report_dtos(reports: Vec<DomainReport>) -> Vec<SharedReport> {
        reports.into_iter().map(Self::to_report_dto).collect()
    }

    fn to_dto_status(status: DomainStatus) -> SharedStatus {
        match status {
            DomainStatus::Ok => SharedStatus::Ok,
            DomainStatus::Warning => SharedStatus::Warning,
            DomainStatus::Overdue => SharedStatus::Overdue,
        }
    }
}
