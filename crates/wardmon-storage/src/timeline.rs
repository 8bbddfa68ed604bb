//! Append-only measurement history for a single patient.

use wardmon_common::types::{PatientId, VitalRecord, VitalSign};

/// All measurements recorded for one patient, in ingestion order.
///
/// Records are kept exactly as they arrive: duplicates and out-of-order
/// timestamps are stored verbatim. Queries sort their result set instead
/// of the underlying history, so the insertion order stays available as
/// the stable tie-break for equal timestamps.
#[derive(Debug)]
pub struct PatientTimeline {
    patient_id: PatientId,
    records: Vec<VitalRecord>,
}

impl PatientTimeline {
    pub fn new(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            records: Vec::new(),
        }
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    /// Appends a record. Never rejects: validation and interpretation are
    /// the rule layer's concern, not storage's.
    pub fn append(&mut self, record: VitalRecord) {
        self.records.push(record);
    }

    /// Records of one sign with `from_ms <= timestamp_ms <= to_ms`, in
    /// ascending timestamp order (stable, so equal timestamps keep their
    /// ingestion order). An inverted range yields an empty result.
    pub fn records_between(&self, sign: &VitalSign, from_ms: i64, to_ms: i64) -> Vec<VitalRecord> {
        let mut matched: Vec<VitalRecord> = self
            .records
            .iter()
            .filter(|r| &r.sign == sign && r.timestamp_ms >= from_ms && r.timestamp_ms <= to_ms)
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.timestamp_ms);
        matched
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
