use wardmon_common::alert::{Alert, Priority};
use wardmon_common::types::VitalSign;

use crate::rules::DEFAULT_WINDOW_MS;
use crate::{AlertRule, PatientView};

/// Combined low blood pressure and low oxygen saturation, a worse
/// condition than either finding alone.
///
/// This cross-signal check is its own strategy rather than an arm of the
/// blood pressure rule, so it can fire in the same evaluation pass as a
/// plain low-pressure alert. The two most recent readings must fall
/// within `max_gap_ms` of each other to count as one clinical moment.
pub struct HypotensiveHypoxemiaRule {
    pub window_ms: i64,
    pub systolic_low: f64,
    pub saturation_low: f64,
    pub max_gap_ms: i64,
    pub priority: Priority,
}

impl Default for HypotensiveHypoxemiaRule {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            systolic_low: 90.0,
            saturation_low: 92.0,
            max_gap_ms: DEFAULT_WINDOW_MS,
            priority: Priority::Critical,
        }
    }
}

impl AlertRule for HypotensiveHypoxemiaRule {
    fn name(&self) -> &str {
        "hypotensive_hypoxemia"
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Option<Alert> {
        let systolic = patient.recent(&VitalSign::SystolicPressure, self.window_ms, now_ms);
        let saturation = patient.recent(&VitalSign::Saturation, self.window_ms, now_ms);

        let s = systolic.last()?;
        let o = saturation.last()?;

        if s.value < self.systolic_low
            && o.value < self.saturation_low
            && (s.timestamp_ms - o.timestamp_ms).abs() <= self.max_gap_ms
        {
            return Some(Alert::new(
                patient.patient_id().to_string(),
                format!("Hypotensive Hypoxemia: BP={} mmHg, O2={}%", s.value, o.value),
                s.timestamp_ms.max(o.timestamp_ms),
            ));
        }
        None
    }
}
