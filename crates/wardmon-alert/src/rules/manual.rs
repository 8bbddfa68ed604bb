use wardmon_common::alert::{Alert, Priority};
use wardmon_common::types::VitalSign;

use crate::rules::DEFAULT_WINDOW_MS;
use crate::{AlertRule, PatientView};

/// Staff-triggered alerts arrive through the data path as `ManualAlert`
/// records: value 1.0 for a press, 0.0 for a resolution.
///
/// The rule surfaces the most recent press in the window, stamped with
/// the press itself. A later resolution record does not cancel it; a
/// press only stops surfacing once it ages out of the window.
pub struct ManualAlertRule {
    pub window_ms: i64,
    pub priority: Priority,
}

impl Default for ManualAlertRule {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            priority: Priority::High,
        }
    }
}

fn is_press(value: f64) -> bool {
    (value - 1.0).abs() < f64::EPSILON
}

impl AlertRule for ManualAlertRule {
    fn name(&self) -> &str {
        "manual_alert"
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Option<Alert> {
        let readings = patient.recent(&VitalSign::ManualAlert, self.window_ms, now_ms);
        let press = readings.iter().rev().find(|r| is_press(r.value))?;
        Some(Alert::new(
            patient.patient_id().to_string(),
            "Manual Alert Triggered",
            press.timestamp_ms,
        ))
    }
}
