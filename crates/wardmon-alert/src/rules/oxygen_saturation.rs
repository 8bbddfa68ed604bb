use wardmon_common::alert::{Alert, Priority};
use wardmon_common::types::VitalSign;

use crate::rules::DEFAULT_WINDOW_MS;
use crate::{AlertRule, PatientView};

/// Oxygen saturation checks over a trailing window, in severity order
/// with the first hit winning:
///
/// 1. latest reading below `critical_low`;
/// 2. spread between the window's highest and lowest reading of at
///    least `drop_threshold` percentage points;
/// 3. average desaturation rate from the oldest to the newest reading of
///    at least `rate_threshold` points per minute.
///
/// The spread and rate checks need two readings; the rate check also
/// needs nonzero elapsed time. One instance reports only the first
/// finding per evaluation, so an operator who wants the spread and rate
/// findings surfaced independently registers two tuned instances.
pub struct OxygenSaturationRule {
    pub window_ms: i64,
    pub critical_low: f64,
    pub drop_threshold: f64,
    pub rate_threshold: f64,
    pub priority: Priority,
}

impl Default for OxygenSaturationRule {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            critical_low: 92.0,
            drop_threshold: 5.0,
            rate_threshold: 0.5,
            priority: Priority::Critical,
        }
    }
}

impl AlertRule for OxygenSaturationRule {
    fn name(&self) -> &str {
        "oxygen_saturation"
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Option<Alert> {
        let readings = patient.recent(&VitalSign::Saturation, self.window_ms, now_ms);
        let latest = readings.last()?;
        let patient_id = patient.patient_id().to_string();

        if latest.value < self.critical_low {
            return Some(Alert::new(
                patient_id,
                format!("Critical Low Oxygen Saturation: {}%", latest.value),
                latest.timestamp_ms,
            ));
        }

        if readings.len() < 2 {
            return None;
        }

        let highest = readings.iter().map(|r| r.value).fold(f64::MIN, f64::max);
        let lowest = readings.iter().map(|r| r.value).fold(f64::MAX, f64::min);
        let drop = highest - lowest;
        if drop >= self.drop_threshold {
            return Some(Alert::new(
                patient_id,
                format!("Rapid Oxygen Drop: {drop:.1}% within window"),
                latest.timestamp_ms,
            ));
        }

        let oldest = readings.first()?;
        let minutes = (latest.timestamp_ms - oldest.timestamp_ms) as f64 / 60_000.0;
        if minutes > 0.0 {
            let rate = (oldest.value - latest.value) / minutes;
            if rate >= self.rate_threshold {
                return Some(Alert::new(
                    patient_id,
                    format!("Fast Oxygen Desaturation: {rate:.1}%/minute"),
                    latest.timestamp_ms,
                ));
            }
        }
        None
    }
}
