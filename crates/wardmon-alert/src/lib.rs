//! Alert rule engine for evaluating patient vital signs against clinical
//! thresholds.
//!
//! Each built-in strategy (blood pressure, hypotensive hypoxemia, oxygen
//! saturation, heart rate, ECG anomaly, manual trigger) implements
//! [`AlertRule`] over a [`PatientView`] of the stored history. The
//! [`evaluator::AlertEvaluator`] runs the registered rules in a fixed
//! order and collects their alerts, optionally tagged with each rule's
//! priority.

pub mod evaluator;
pub mod rules;
pub mod stats;

#[cfg(test)]
mod tests;

use wardmon_common::alert::{Alert, Priority};
use wardmon_common::types::{PatientId, VitalRecord, VitalSign};
use wardmon_storage::PatientHandle;

/// A rule strategy that examines one patient's recent history and
/// reports at most one condition per evaluation.
///
/// Implementations are registered in the [`evaluator::AlertEvaluator`].
/// Missing or insufficient data is not an error: the rule stays silent
/// and returns `None`. The evaluation instant is always passed in as
/// `now_ms` so behavior is reproducible under test.
pub trait AlertRule: Send + Sync {
    /// Short identifier used in logs (e.g. `"blood_pressure"`).
    fn name(&self) -> &str;

    /// The urgency attached when the evaluator prioritizes this rule's
    /// alerts.
    fn priority(&self) -> Priority;

    /// Evaluates the patient's history as of `now_ms` and returns an
    /// alert if the rule condition is met, or `None` otherwise.
    fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Option<Alert>;
}

/// Read access to one patient's stored measurements, as seen by rules.
///
/// Rules never mutate storage and never see other patients, so this is
/// the entire surface they get.
pub trait PatientView {
    fn patient_id(&self) -> PatientId;

    /// Records of one sign with timestamps in `[from_ms, to_ms]`,
    /// ascending by timestamp.
    fn records_between(&self, sign: &VitalSign, from_ms: i64, to_ms: i64) -> Vec<VitalRecord>;

    /// Records of one sign from the trailing window ending at `now_ms`.
    ///
    /// The window is `[now_ms - window_ms, i64::MAX]`: records stamped
    /// ahead of the evaluation instant are deliberately visible, so a
    /// device clock running fast cannot hide a critical reading.
    fn recent(&self, sign: &VitalSign, window_ms: i64, now_ms: i64) -> Vec<VitalRecord> {
        self.records_between(sign, now_ms - window_ms, i64::MAX)
    }
}

impl PatientView for PatientHandle<'_> {
    fn patient_id(&self) -> PatientId {
        self.id()
    }

    fn records_between(&self, sign: &VitalSign, from_ms: i64, to_ms: i64) -> Vec<VitalRecord> {
        PatientHandle::records_between(self, sign, from_ms, to_ms)
    }
}
