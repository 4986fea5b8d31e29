//! Fuel service domain logic for the fuel tracker.
//!
//! The service owns the in-memory [`EntryStore`] (raw fill-ups plus the
//! maintenance record) and is the only writer to it. Every read view (processed
//! list, statistics, reminders, month summaries) is derived from scratch from the
//! raw set on each call. Every mutation is applied to a copy of the store, written
//! through the storage traits, and only then becomes the current store, so a failed
//! save leaves memory as it was.
//!
//! Storage access is gated by an explicit [`Session`]: nothing is loaded or saved
//! while the session is inactive.

use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::domain::commands::dashboard::DashboardResult;
use crate::domain::commands::entries::{EntryListQuery, EntryListResult, SaveEntryCommand};
use crate::domain::commands::maintenance::{MaintenanceStatusResult, SaveMaintenanceCommand};
use crate::domain::derivation::{derive_entries, derive_for_display};
use crate::domain::entry_form;
use crate::domain::error::DomainError;
use crate::domain::export_service::{self, ExportPayload};
use crate::domain::maintenance_service;
use crate::domain::mileage::current_mileage;
use crate::domain::models::fuel_entry::RawFuelEntry;
use crate::domain::models::maintenance::{MaintenanceData, MaintenanceReport};
use crate::domain::models::session::Session;
use crate::domain::seed::seed_entries;
use crate::domain::statistics::{self, MonthFilter, MonthKey, MonthSummary, Statistics};
use crate::storage::{Connection, FuelEntryStorage, MaintenanceStorage};

/// Raw fill-ups and the maintenance record, as last loaded or edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryStore {
    entries: Vec<RawFuelEntry>,
    maintenance: MaintenanceData,
}

impl EntryStore {
    pub fn new(entries: Vec<RawFuelEntry>, maintenance: MaintenanceData) -> Self {
        Self {
            entries,
            maintenance,
        }
    }

    pub fn entries(&self) -> &[RawFuelEntry] {
        &self.entries
    }

    pub fn maintenance(&self) -> &MaintenanceData {
        &self.maintenance
    }

    pub fn get(&self, id: &str) -> Option<&RawFuelEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// First free `fillup::<millis>` id at or after `epoch_millis`
    pub fn next_id(&self, epoch_millis: u64) -> String {
        let mut millis = epoch_millis;
        loop {
            let id = RawFuelEntry::generate_id(millis);
            if !self.contains(&id) {
                return id;
            }
            millis += 1;
        }
    }

    pub fn add(&mut self, entry: RawFuelEntry) {
        self.entries.push(entry);
    }

    /// Replace the entry with the same id. Returns false when no entry matches.
    pub fn update(&mut self, entry: RawFuelEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with the given id. Returns false when no entry matches.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn set_maintenance(&mut self, maintenance: MaintenanceData) {
        self.maintenance = maintenance;
    }
}

pub struct FuelService<C: Connection> {
    entry_repository: C::FuelEntryRepository,
    maintenance_repository: C::MaintenanceRepository,
    store: Mutex<EntryStore>,
}

impl<C: Connection> FuelService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            entry_repository: connection.create_fuel_entry_repository(),
            maintenance_repository: connection.create_maintenance_repository(),
            store: Mutex::new(EntryStore::default()),
        }
    }

    fn ensure_active(session: &Session) -> Result<()> {
        if session.is_active() {
            Ok(())
        } else {
            Err(DomainError::SessionInactive.into())
        }
    }

    /// Load the store from storage.
    ///
    /// Absent or unreadable entries fall back to the seed dataset; an absent or
    /// unreadable maintenance record falls back to "no records".
    pub async fn load(&self, session: &Session) -> Result<()> {
        Self::ensure_active(session)?;

        let entries = match self.entry_repository.load_entries().await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                info!("No stored fill-ups yet, starting from the seed dataset");
                seed_entries()
            }
            Err(e) => {
                warn!("Stored fill-ups could not be read ({:#}), starting from the seed dataset", e);
                seed_entries()
            }
        };

        let maintenance = match self.maintenance_repository.load_maintenance().await {
            Ok(data) => data.unwrap_or_default(),
            Err(e) => {
                warn!("Stored maintenance record could not be read ({:#}), using empty record", e);
                MaintenanceData::default()
            }
        };

        info!("Fuel store loaded with {} fill-ups", entries.len());
        *self.store.lock().await = EntryStore::new(entries, maintenance);
        Ok(())
    }

    async fn persist_entries(&self, session: &Session, store: &EntryStore) -> Result<()> {
        Self::ensure_active(session)?;
        self.entry_repository.save_entries(store.entries()).await
    }

    async fn persist_maintenance(&self, session: &Session, store: &EntryStore) -> Result<()> {
        Self::ensure_active(session)?;
        self.maintenance_repository
            .save_maintenance(store.maintenance())
            .await
    }

    pub async fn add_entry(&self, session: &Session, command: SaveEntryCommand) -> Result<RawFuelEntry> {
        Self::ensure_active(session)?;
        let fields = entry_form::entry_fields(&command)?;
        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;

        // mutations go to a copy; memory only changes once the save succeeds
        let mut store = self.store.lock().await;
        let mut next = store.clone();
        let entry = fields.into_entry(next.next_id(now_millis));
        next.add(entry.clone());
        self.persist_entries(session, &next).await?;
        *store = next;

        info!("Added fill-up {} ({} km, {:.2})", entry.id, entry.km_end, entry.total_value);
        Ok(entry)
    }

    /// Replace every field of an existing entry except its id.
    /// An unknown id leaves the store untouched and returns `None`.
    pub async fn update_entry(
        &self,
        session: &Session,
        id: &str,
        command: SaveEntryCommand,
    ) -> Result<Option<RawFuelEntry>> {
        Self::ensure_active(session)?;
        let fields = entry_form::entry_fields(&command)?;

        let mut store = self.store.lock().await;
        let mut next = store.clone();
        let entry = fields.into_entry(id.to_string());
        if !next.update(entry.clone()) {
            warn!("Ignoring edit of unknown fill-up {}", id);
            return Ok(None);
        }
        self.persist_entries(session, &next).await?;
        *store = next;

        info!("Updated fill-up {}", id);
        Ok(Some(entry))
    }

    /// Returns false, without touching storage, when the id is unknown.
    pub async fn delete_entry(&self, session: &Session, id: &str) -> Result<bool> {
        Self::ensure_active(session)?;

        let mut store = self.store.lock().await;
        let mut next = store.clone();
        if !next.remove(id) {
            warn!("Ignoring delete of unknown fill-up {}", id);
            return Ok(false);
        }
        self.persist_entries(session, &next).await?;
        *store = next;

        info!("Deleted fill-up {}", id);
        Ok(true)
    }

    pub async fn save_maintenance(
        &self,
        session: &Session,
        command: SaveMaintenanceCommand,
    ) -> Result<MaintenanceData> {
        Self::ensure_active(session)?;
        let data = entry_form::maintenance_data(&command);

        let mut store = self.store.lock().await;
        let mut next = store.clone();
        next.set_maintenance(data);
        self.persist_maintenance(session, &next).await?;
        *store = next;

        info!("Saved maintenance record {:?}", data);
        Ok(data)
    }

    pub async fn maintenance(&self) -> MaintenanceData {
        *self.store.lock().await.maintenance()
    }

    pub async fn raw_entry(&self, id: &str) -> Option<RawFuelEntry> {
        self.store.lock().await.get(id).cloned()
    }

    pub async fn raw_entries(&self) -> Vec<RawFuelEntry> {
        self.store.lock().await.entries().to_vec()
    }

    /// Processed entries, most recent first, restricted to the query's month
    pub async fn list_entries(&self, query: EntryListQuery) -> EntryListResult {
        let store = self.store.lock().await;
        let processed = derive_for_display(store.entries());

        EntryListResult {
            entries: statistics::filter_by_month(&processed, query.filter),
            filter: query.filter,
        }
    }

    pub async fn overall_statistics(&self) -> Statistics {
        let store = self.store.lock().await;
        statistics::aggregate(&derive_entries(store.entries()))
    }

    pub async fn dashboard(&self, filter: MonthFilter) -> DashboardResult {
        let store = self.store.lock().await;
        let processed = derive_entries(store.entries());
        let selected = statistics::filter_by_month(&processed, filter);
        let mileage = current_mileage(store.entries());

        DashboardResult {
            current_mileage: mileage,
            filter,
            statistics: statistics::aggregate(&selected),
            reminders: maintenance_service::reminders(mileage, store.maintenance()),
        }
    }

    /// Months with fill-ups plus the month containing `today`, most recent first
    pub async fn available_months(&self, today: NaiveDate) -> Vec<MonthKey> {
        let store = self.store.lock().await;
        statistics::available_months(&derive_entries(store.entries()), MonthKey::of_date(today))
    }

    pub async fn month_summary(&self, month: MonthKey) -> Option<MonthSummary> {
        let store = self.store.lock().await;
        statistics::month_summary(&derive_entries(store.entries()), month)
    }

    /// Odometer hint for the add-entry form
    pub async fn last_known_mileage(&self) -> u64 {
        current_mileage(self.store.lock().await.entries())
    }

    pub async fn reminders(&self) -> Vec<MaintenanceReport> {
        let store = self.store.lock().await;
        maintenance_service::reminders(current_mileage(store.entries()), store.maintenance())
    }

    pub async fn maintenance_status(&self) -> MaintenanceStatusResult {
        let store = self.store.lock().await;
        let mileage = current_mileage(store.entries());

        MaintenanceStatusResult {
            current_mileage: mileage,
            has_records: store.maintenance().has_records(),
            reports: maintenance_service::detailed_status(mileage, store.maintenance()),
        }
    }

    pub async fn export_csv(&self) -> Result<ExportPayload, DomainError> {
        export_service::export_csv(self.store.lock().await.entries())
    }
}
