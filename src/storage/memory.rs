//! In-memory history store for tests.
//!
//! Each vessel's history sits behind its own lock, so writers for different
//! vessels never wait on each other.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::model::ReportRecord;

use super::{HistoryStore, Result, Upserted, VesselSummary};

type VesselHistory = Arc<Mutex<Vec<ReportRecord>>>;

#[derive(Default)]
pub struct MemoryStore {
    vessels: RwLock<BTreeMap<String, VesselHistory>>,
}

impl MemoryStore {
    fn vessel(&self, vessel_id: &str) -> Option<VesselHistory> {
        let vessels = self.vessels.read().unwrap_or_else(PoisonError::into_inner);
        vessels.get(vessel_id).cloned()
    }

    fn vessel_or_insert(&self, vessel_id: &str) -> VesselHistory {
        if let Some(history) = self.vessel(vessel_id) {
            return history;
        }
        let mut vessels = self.vessels.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(vessels.entry(vessel_id.to_string()).or_default())
    }
}

impl HistoryStore for MemoryStore {
    fn history(&self, vessel_id: &str) -> Result<Vec<ReportRecord>> {
        let Some(history) = self.vessel(vessel_id) else {
            return Ok(Vec::new());
        };
        let mut records = history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        records.sort_by_key(|r| r.occurred_on);
        Ok(records)
    }

    fn upsert(&self, record: &ReportRecord) -> Result<Upserted> {
        let history = self.vessel_or_insert(&record.vessel_id);
        let mut records = history.lock().unwrap_or_else(PoisonError::into_inner);

        let existing = records.iter_mut().find(|r| {
            r.occurred_on == record.occurred_on && r.report_type == record.report_type
        });
        if let Some(existing) = existing {
            existing.cargo_status = record.cargo_status;
            return Ok(Upserted::Updated);
        }
        records.push(record.clone());
        Ok(Upserted::Inserted)
    }

    fn vessels(&self) -> Result<Vec<VesselSummary>> {
        let ids: Vec<String> = self
            .vessels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();

        let mut summaries = Vec::new();
        for vessel_id in ids {
            let history = self.history(&vessel_id)?;
            if let Some(latest) = history.last() {
                summaries.push(VesselSummary {
                    vessel_id,
                    reports: history.len(),
                    latest: latest.clone(),
                });
            }
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use jiff::civil::date;

    use crate::model::{CargoStatus, ReportType};

    fn record(vessel: &str, day: i8) -> ReportRecord {
        ReportRecord {
            vessel_id: vessel.into(),
            occurred_on: date(2025, 6, day),
            cargo_status: CargoStatus::Ballast,
            report_type: ReportType::AtSea,
        }
    }

    #[test]
    fn upsert_replaces_same_key() {
        let store = MemoryStore::default();
        assert_eq!(store.upsert(&record("A", 1)).unwrap(), Upserted::Inserted);

        let mut laden = record("A", 1);
        laden.cargo_status = CargoStatus::Laden;
        assert_eq!(store.upsert(&laden).unwrap(), Upserted::Updated);

        assert_eq!(store.history("A").unwrap(), vec![laden]);
    }

    #[test]
    fn concurrent_writers_for_different_vessels() {
        let store = Arc::new(MemoryStore::default());
        let handles: Vec<_> = ["A", "B", "C"]
            .into_iter()
            .map(|vessel| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for day in 1..=20 {
                        store.upsert(&record(vessel, day)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let vessels = store.vessels().unwrap();
        assert_eq!(vessels.len(), 3);
        assert!(vessels.iter().all(|v| v.reports == 20));
    }
}
