use wardmon_common::alert::{Alert, PriorityAlert};

use crate::rules::{
    BloodPressureRule, EcgAnomalyRule, HeartRateRule, HypotensiveHypoxemiaRule, ManualAlertRule,
    OxygenSaturationRule,
};
use crate::{AlertRule, PatientView};

/// Runs a fixed set of rule strategies over one patient at a time.
///
/// Rules are evaluated in registration order and each contributes at
/// most one alert, so the output is deterministic given the same stored
/// data and evaluation instant. The evaluator holds no per-patient
/// state; deduplication within one pass is structural (one alert per
/// rule) and suppression across passes is the caller's concern.
pub struct AlertEvaluator {
    rules: Vec<Box<dyn AlertRule>>,
}

impl AlertEvaluator {
    pub fn new(rules: Vec<Box<dyn AlertRule>>) -> Self {
        Self { rules }
    }

    /// The built-in strategies with canonical thresholds, in evaluation
    /// order: blood pressure, hypotensive hypoxemia, oxygen saturation,
    /// heart rate, ECG anomaly, manual trigger.
    pub fn with_default_rules() -> Self {
        Self::new(vec![
            Box::new(BloodPressureRule::default()),
            Box::new(HypotensiveHypoxemiaRule::default()),
            Box::new(OxygenSaturationRule::default()),
            Box::new(HeartRateRule::default()),
            Box::new(EcgAnomalyRule::default()),
            Box::new(ManualAlertRule::default()),
        ])
    }

    pub fn rules(&self) -> &[Box<dyn AlertRule>] {
        &self.rules
    }

    /// Appends a rule; it evaluates after all previously registered ones.
    pub fn add_rule(&mut self, rule: Box<dyn AlertRule>) {
        self.rules.push(rule);
    }

    /// Evaluates every rule and collects the alerts, each tagged with its
    /// producing rule's priority.
    pub fn evaluate_prioritized(
        &self,
        patient: &dyn PatientView,
        now_ms: i64,
    ) -> Vec<PriorityAlert<Alert>> {
        let mut alerts = Vec::new();
        for rule in &self.rules {
            if let Some(alert) = rule.evaluate(patient, now_ms) {
                tracing::debug!(
                    rule = rule.name(),
                    patient_id = patient.patient_id(),
                    condition = %alert.condition,
                    "Rule fired"
                );
                alerts.push(PriorityAlert::new(alert, rule.priority()));
            }
        }
        alerts
    }

    /// Same pass as [`evaluate_prioritized`](Self::evaluate_prioritized),
    /// returning the plain alerts without priority tags.
    pub fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Vec<Alert> {
        self.evaluate_prioritized(patient, now_ms)
            .into_iter()
            .map(PriorityAlert::into_inner)
            .collect()
    }
}
