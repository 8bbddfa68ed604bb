//! Concurrent patient-to-timeline map.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use wardmon_common::types::{PatientId, VitalRecord, VitalSign};

use crate::timeline::PatientTimeline;
use crate::VitalQuery;

/// Acquire a read guard, recovering from poisoning if a writer panicked.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Acquire a write guard, recovering from poisoning if a writer panicked.
fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Process-wide map from patient id to timeline.
///
/// Two locking levels: the map itself behind one `RwLock`, and each
/// timeline behind its own `Arc<RwLock<..>>`. Ingestion takes the map
/// write lock only when it sees a patient for the first time, so writers
/// for different patients do not contend once their timelines exist, and
/// concurrent appends for the same patient serialize on that patient's
/// lock alone. Timelines are created lazily and live for the process.
///
/// The directory is explicitly constructed and shared (`Arc`), never a
/// global.
///
/// # Examples
///
/// ```
/// use wardmon_storage::{PatientDirectory, VitalQuery};
/// use wardmon_common::types::VitalSign;
///
/// let directory = PatientDirectory::new();
/// directory.ingest(1, VitalSign::HeartRate, 72.0, 1000);
///
/// let results = directory.query(&VitalQuery {
///     patient_id: 1,
///     sign: VitalSign::HeartRate,
///     from_ms: 0,
///     to_ms: 2000,
/// });
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].value, 72.0);
/// ```
#[derive(Debug, Default)]
pub struct PatientDirectory {
    patients: RwLock<HashMap<PatientId, Arc<RwLock<PatientTimeline>>>>,
}

impl PatientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one measurement, creating the patient's timeline on first
    /// contact. Never rejects and performs no I/O.
    pub fn ingest(&self, patient_id: PatientId, sign: VitalSign, value: f64, timestamp_ms: i64) {
        self.ingest_record(VitalRecord::new(patient_id, sign, value, timestamp_ms));
    }

    pub fn ingest_record(&self, record: VitalRecord) {
        let timeline = self.timeline_or_create(record.patient_id);
        write_lock(&timeline).append(record);
    }

    /// Records matching the query, ascending by timestamp. Empty for
    /// unknown patients, no matches, or an inverted range.
    pub fn query(&self, query: &VitalQuery) -> Vec<VitalRecord> {
        self.patient(query.patient_id)
            .records_between(&query.sign, query.from_ms, query.to_ms)
    }

    /// Cheap per-patient view, valid for any id: queries through a handle
    /// to an unknown patient are empty. The handle resolves the live
    /// timeline on every call, so records ingested after the handle was
    /// created are visible through it.
    pub fn patient(&self, patient_id: PatientId) -> PatientHandle<'_> {
        PatientHandle {
            directory: self,
            patient_id,
        }
    }

    /// Ids of every patient with at least one record, ascending.
    pub fn patient_ids(&self) -> Vec<PatientId> {
        let mut ids: Vec<PatientId> = read_lock(&self.patients).keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn patient_count(&self) -> usize {
        read_lock(&self.patients).len()
    }

    /// Total records stored for one patient, zero if unknown.
    pub fn record_count(&self, patient_id: PatientId) -> usize {
        match self.timeline(patient_id) {
            Some(timeline) => read_lock(&timeline).len(),
            None => 0,
        }
    }

    fn timeline(&self, patient_id: PatientId) -> Option<Arc<RwLock<PatientTimeline>>> {
        read_lock(&self.patients).get(&patient_id).map(Arc::clone)
    }

    fn timeline_or_create(&self, patient_id: PatientId) -> Arc<RwLock<PatientTimeline>> {
        if let Some(timeline) = self.timeline(patient_id) {
            return timeline;
        }
        let mut patients = write_lock(&self.patients);
        let timeline = patients.entry(patient_id).or_insert_with(|| {
            tracing::debug!(patient_id, "Created timeline for new patient");
            Arc::new(RwLock::new(PatientTimeline::new(patient_id)))
        });
        Arc::clone(timeline)
    }
}

/// Borrowed read view of one patient's history, handed to rule
/// evaluation. Holds no lock between calls.
#[derive(Debug, Clone, Copy)]
pub struct PatientHandle<'a> {
    directory: &'a PatientDirectory,
    patient_id: PatientId,
}

impl PatientHandle<'_> {
    pub fn id(&self) -> PatientId {
        self.patient_id
    }

    /// Same contract as [`PatientTimeline::records_between`]; empty when
    /// the patient has no timeline yet.
    pub fn records_between(&self, sign: &VitalSign, from_ms: i64, to_ms: i64) -> Vec<VitalRecord> {
        match self.directory.timeline(self.patient_id) {
            Some(timeline) => read_lock(&timeline).records_between(sign, from_ms, to_ms),
            None => Vec::new(),
        }
    }
}
