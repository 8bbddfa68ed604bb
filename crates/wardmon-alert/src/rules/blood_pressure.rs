use wardmon_common::alert::{Alert, Priority};
use wardmon_common::types::{PatientId, VitalRecord, VitalSign};

use crate::rules::DEFAULT_WINDOW_MS;
use crate::{AlertRule, PatientView};

/// Blood pressure checks over a trailing window: critical threshold
/// breaches first, then a consecutive-reading trend scan.
///
/// The threshold check looks only at the single most recent systolic and
/// diastolic reading and requires both signals to be present; its alert
/// carries the later of the two source timestamps. When it fires, the
/// trend scan is skipped entirely for this evaluation.
///
/// The trend scan examines the last `trend_len` readings of each signal
/// (systolic before diastolic, increasing before decreasing): every
/// consecutive difference strictly above `trend_step` is an increasing
/// trend, every difference strictly below `-trend_step` a decreasing
/// one. Trend alerts are stamped with the evaluation instant, since the
/// finding is about the sequence rather than any single reading.
pub struct BloodPressureRule {
    pub window_ms: i64,
    pub systolic_high: f64,
    pub systolic_low: f64,
    pub diastolic_high: f64,
    pub diastolic_low: f64,
    pub trend_step: f64,
    pub trend_len: usize,
    pub priority: Priority,
}

impl Default for BloodPressureRule {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            systolic_high: 180.0,
            systolic_low: 90.0,
            diastolic_high: 120.0,
            diastolic_low: 60.0,
            trend_step: 10.0,
            trend_len: 3,
            priority: Priority::Critical,
        }
    }
}

impl BloodPressureRule {
    fn threshold_alert(
        &self,
        patient_id: PatientId,
        systolic: &[VitalRecord],
        diastolic: &[VitalRecord],
    ) -> Option<Alert> {
        let s = systolic.last()?;
        let d = diastolic.last()?;
        let timestamp_ms = s.timestamp_ms.max(d.timestamp_ms);

        if s.value > self.systolic_high || d.value > self.diastolic_high {
            return Some(Alert::new(
                patient_id.to_string(),
                format!("Critical Blood Pressure: {}/{} mmHg", s.value, d.value),
                timestamp_ms,
            ));
        }
        if s.value < self.systolic_low || d.value < self.diastolic_low {
            return Some(Alert::new(
                patient_id.to_string(),
                format!("Low Blood Pressure: {}/{} mmHg", s.value, d.value),
                timestamp_ms,
            ));
        }
        None
    }

    fn trend_alert(
        &self,
        patient_id: PatientId,
        systolic: &[VitalRecord],
        diastolic: &[VitalRecord],
        now_ms: i64,
    ) -> Option<Alert> {
        if self.trend_len < 2 {
            return None;
        }
        for readings in [systolic, diastolic] {
            if readings.len() < self.trend_len {
                continue;
            }
            let tail = &readings[readings.len() - self.trend_len..];
            if all_steps(tail, |diff| diff > self.trend_step) {
                return Some(Alert::new(
                    patient_id.to_string(),
                    "Increasing Blood Pressure Trend Detected",
                    now_ms,
                ));
            }
            if all_steps(tail, |diff| diff < -self.trend_step) {
                return Some(Alert::new(
                    patient_id.to_string(),
                    "Decreasing Blood Pressure Trend Detected",
                    now_ms,
                ));
            }
        }
        None
    }
}

fn all_steps(tail: &[VitalRecord], pred: impl Fn(f64) -> bool) -> bool {
    tail.windows(2).all(|pair| pred(pair[1].value - pair[0].value))
}

impl AlertRule for BloodPressureRule {
    fn name(&self) -> &str {
        "blood_pressure"
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Option<Alert> {
        let systolic = patient.recent(&VitalSign::SystolicPressure, self.window_ms, now_ms);
        let diastolic = patient.recent(&VitalSign::DiastolicPressure, self.window_ms, now_ms);

        if let Some(alert) = self.threshold_alert(patient.patient_id(), &systolic, &diastolic) {
            return Some(alert);
        }
        self.trend_alert(patient.patient_id(), &systolic, &diastolic, now_ms)
    }
}
