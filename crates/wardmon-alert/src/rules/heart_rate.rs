use wardmon_common::alert::{Alert, Priority};
use wardmon_common::types::VitalSign;

use crate::stats;
use crate::{AlertRule, PatientView};

/// Heart rate checks over a trailing window.
///
/// The bradycardia and tachycardia bounds apply to the latest reading
/// only and are strict, so a rate of exactly `low_bpm` or `high_bpm` is
/// still in range. Irregularity needs at least `min_samples` readings
/// and compares the mean absolute beat-to-beat difference against
/// `irregularity_ratio` times the mean rate, scaling the sensitivity
/// with the patient's own baseline.
pub struct HeartRateRule {
    pub window_ms: i64,
    pub low_bpm: f64,
    pub high_bpm: f64,
    pub min_samples: usize,
    pub irregularity_ratio: f64,
    pub priority: Priority,
}

impl Default for HeartRateRule {
    fn default() -> Self {
        Self {
            window_ms: 5 * 60 * 1000,
            low_bpm: 50.0,
            high_bpm: 100.0,
            min_samples: 5,
            irregularity_ratio: 0.1,
            priority: Priority::High,
        }
    }
}

impl AlertRule for HeartRateRule {
    fn name(&self) -> &str {
        "heart_rate"
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Option<Alert> {
        let readings = patient.recent(&VitalSign::HeartRate, self.window_ms, now_ms);
        let latest = readings.last()?;
        let patient_id = patient.patient_id().to_string();

        if latest.value < self.low_bpm {
            return Some(Alert::new(
                patient_id,
                format!("Bradycardia Alert: {} bpm", latest.value),
                latest.timestamp_ms,
            ));
        }
        if latest.value > self.high_bpm {
            return Some(Alert::new(
                patient_id,
                format!("Tachycardia Alert: {} bpm", latest.value),
                latest.timestamp_ms,
            ));
        }

        if readings.len() >= self.min_samples {
            let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
            let mean_rate = stats::mean(&values);
            if mean_rate > 0.0
                && stats::mean_abs_consecutive_diff(&values) > self.irregularity_ratio * mean_rate
            {
                return Some(Alert::new(
                    patient_id,
                    "Irregular Heart Rate Detected",
                    latest.timestamp_ms,
                ));
            }
        }
        None
    }
}
