use wardmon_common::alert::{Alert, Priority};
use wardmon_common::types::VitalSign;

use crate::rules::DEFAULT_WINDOW_MS;
use crate::stats;
use crate::{AlertRule, PatientView};

/// ECG anomaly detection over a fixed sample count rather than a time
/// span: the most recent `sample_count` readings form the baseline, and
/// the latest reading is anomalous when it deviates from the baseline
/// mean by more than `sigma_factor` population standard deviations.
///
/// Fewer than `sample_count` readings in the fetch window means no
/// evaluation at all. A flat baseline has zero deviation and never
/// fires, since the latest reading is part of its own baseline.
pub struct EcgAnomalyRule {
    pub window_ms: i64,
    pub sample_count: usize,
    pub sigma_factor: f64,
    pub priority: Priority,
}

impl Default for EcgAnomalyRule {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            sample_count: 30,
            sigma_factor: 3.0,
            priority: Priority::Medium,
        }
    }
}

impl AlertRule for EcgAnomalyRule {
    fn name(&self) -> &str {
        "ecg_anomaly"
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Option<Alert> {
        let readings = patient.recent(&VitalSign::Ecg, self.window_ms, now_ms);
        if readings.len() < self.sample_count {
            return None;
        }

        let baseline = &readings[readings.len() - self.sample_count..];
        let values: Vec<f64> = baseline.iter().map(|r| r.value).collect();
        let mean = stats::mean(&values);
        let sigma = stats::population_std_dev(&values);

        let latest = baseline.last()?;
        let deviation = (latest.value - mean).abs();
        if deviation > self.sigma_factor * sigma {
            return Some(Alert::new(
                patient.patient_id().to_string(),
                format!(
                    "ECG Anomaly: value {}, deviation {:.2} (σ={:.2})",
                    latest.value, deviation, sigma
                ),
                latest.timestamp_ms,
            ));
        }
        None
    }
}
