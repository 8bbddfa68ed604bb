use wardmon_common::alert::{Alert, AlertView, Priority};
use wardmon_common::types::VitalSign;
use wardmon_storage::PatientDirectory;

use crate::evaluator::AlertEvaluator;
use crate::rules::{
    BloodPressureRule, EcgAnomalyRule, HeartRateRule, HypotensiveHypoxemiaRule, ManualAlertRule,
    OxygenSaturationRule,
};
use crate::{AlertRule, PatientView};

const MINUTE_MS: i64 = 60_000;
const NOW_MS: i64 = 1_700_000_000_000;

fn directory_with(records: &[(VitalSign, f64, i64)]) -> PatientDirectory {
    let directory = PatientDirectory::new();
    for (sign, value, timestamp_ms) in records {
        directory.ingest(1, sign.clone(), *value, *timestamp_ms);
    }
    directory
}

fn eval_rule(rule: &dyn AlertRule, records: &[(VitalSign, f64, i64)]) -> Option<Alert> {
    let directory = directory_with(records);
    rule.evaluate(&directory.patient(1), NOW_MS)
}

#[test]
fn blood_pressure_critical_high() {
    let alert = eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 190.0, NOW_MS - MINUTE_MS),
            (VitalSign::DiastolicPressure, 80.0, NOW_MS - MINUTE_MS + 1000),
        ],
    )
    .unwrap();

    assert_eq!(alert.condition, "Critical Blood Pressure: 190/80 mmHg");
    assert_eq!(alert.patient_id, "1");
    // Stamped with the later of the two source readings.
    assert_eq!(alert.timestamp_ms, NOW_MS - MINUTE_MS + 1000);
}

#[test]
fn blood_pressure_critical_low() {
    let alert = eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 110.0, NOW_MS - MINUTE_MS),
            (VitalSign::DiastolicPressure, 55.0, NOW_MS - MINUTE_MS),
        ],
    )
    .unwrap();

    assert_eq!(alert.condition, "Low Blood Pressure: 110/55 mmHg");
}

#[test]
fn blood_pressure_bounds_are_strict() {
    // Exactly at the limits is still in range.
    assert!(eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 180.0, NOW_MS - MINUTE_MS),
            (VitalSign::DiastolicPressure, 120.0, NOW_MS - MINUTE_MS),
        ],
    )
    .is_none());
    assert!(eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 90.0, NOW_MS - MINUTE_MS),
            (VitalSign::DiastolicPressure, 60.0, NOW_MS - MINUTE_MS),
        ],
    )
    .is_none());
}

#[test]
fn blood_pressure_threshold_needs_both_signals() {
    assert!(eval_rule(
        &BloodPressureRule::default(),
        &[(VitalSign::SystolicPressure, 190.0, NOW_MS - MINUTE_MS)],
    )
    .is_none());
}

#[test]
fn blood_pressure_increasing_trend() {
    let alert = eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 100.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::SystolicPressure, 115.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::SystolicPressure, 130.0, NOW_MS - MINUTE_MS),
            (VitalSign::DiastolicPressure, 80.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::DiastolicPressure, 80.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::DiastolicPressure, 80.0, NOW_MS - MINUTE_MS),
        ],
    )
    .unwrap();

    assert_eq!(alert.condition, "Increasing Blood Pressure Trend Detected");
    // Trend findings describe the sequence, stamped at evaluation time.
    assert_eq!(alert.timestamp_ms, NOW_MS);
}

#[test]
fn blood_pressure_decreasing_trend() {
    let alert = eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 160.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::SystolicPressure, 145.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::SystolicPressure, 130.0, NOW_MS - MINUTE_MS),
        ],
    )
    .unwrap();

    assert_eq!(alert.condition, "Decreasing Blood Pressure Trend Detected");
}

#[test]
fn blood_pressure_two_readings_are_no_trend() {
    assert!(eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 100.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::SystolicPressure, 115.0, NOW_MS - MINUTE_MS),
        ],
    )
    .is_none());
}

#[test]
fn blood_pressure_trend_steps_are_strict() {
    // Differences of exactly the step are not a trend.
    assert!(eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 100.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::SystolicPressure, 110.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::SystolicPressure, 120.0, NOW_MS - MINUTE_MS),
        ],
    )
    .is_none());
}

#[test]
fn blood_pressure_threshold_short_circuits_trend() {
    let alert = eval_rule(
        &BloodPressureRule::default(),
        &[
            (VitalSign::SystolicPressure, 160.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::SystolicPressure, 185.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::SystolicPressure, 210.0, NOW_MS - MINUTE_MS),
            (VitalSign::DiastolicPressure, 80.0, NOW_MS - MINUTE_MS),
        ],
    )
    .unwrap();

    // The readings also form an increasing trend, but the critical
    // threshold wins the evaluation.
    assert_eq!(alert.condition, "Critical Blood Pressure: 210/80 mmHg");
}

#[test]
fn hypotensive_hypoxemia_fires() {
    let alert = eval_rule(
        &HypotensiveHypoxemiaRule::default(),
        &[
            (VitalSign::SystolicPressure, 85.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::Saturation, 90.0, NOW_MS - MINUTE_MS),
        ],
    )
    .unwrap();

    assert_eq!(alert.condition, "Hypotensive Hypoxemia: BP=85 mmHg, O2=90%");
    assert_eq!(alert.timestamp_ms, NOW_MS - MINUTE_MS);
}

#[test]
fn hypotensive_hypoxemia_needs_proximity() {
    // A future-stamped reading is still visible to the window, but the
    // two readings are more than the allowed gap apart.
    assert!(eval_rule(
        &HypotensiveHypoxemiaRule::default(),
        &[
            (VitalSign::SystolicPressure, 85.0, NOW_MS - 550_000),
            (VitalSign::Saturation, 90.0, NOW_MS + 120_000),
        ],
    )
    .is_none());

    // Same future-stamped reading within the gap fires.
    assert!(eval_rule(
        &HypotensiveHypoxemiaRule::default(),
        &[
            (VitalSign::SystolicPressure, 85.0, NOW_MS - 400_000),
            (VitalSign::Saturation, 90.0, NOW_MS + 120_000),
        ],
    )
    .is_some());
}

#[test]
fn hypotensive_hypoxemia_needs_both_conditions() {
    assert!(eval_rule(
        &HypotensiveHypoxemiaRule::default(),
        &[
            (VitalSign::SystolicPressure, 85.0, NOW_MS - MINUTE_MS),
            (VitalSign::Saturation, 95.0, NOW_MS - MINUTE_MS),
        ],
    )
    .is_none());
    assert!(eval_rule(
        &HypotensiveHypoxemiaRule::default(),
        &[
            (VitalSign::SystolicPressure, 120.0, NOW_MS - MINUTE_MS),
            (VitalSign::Saturation, 90.0, NOW_MS - MINUTE_MS),
        ],
    )
    .is_none());
}

#[test]
fn oxygen_critical_low() {
    let alert = eval_rule(
        &OxygenSaturationRule::default(),
        &[(VitalSign::Saturation, 91.5, NOW_MS - MINUTE_MS)],
    )
    .unwrap();

    assert_eq!(alert.condition, "Critical Low Oxygen Saturation: 91.5%");
    assert_eq!(alert.timestamp_ms, NOW_MS - MINUTE_MS);
}

#[test]
fn oxygen_rapid_drop() {
    let alert = eval_rule(
        &OxygenSaturationRule::default(),
        &[
            (VitalSign::Saturation, 98.0, NOW_MS - 8 * MINUTE_MS),
            (VitalSign::Saturation, 93.0, NOW_MS - MINUTE_MS),
        ],
    )
    .unwrap();

    assert_eq!(alert.condition, "Rapid Oxygen Drop: 5.0% within window");
}

#[test]
fn oxygen_desaturation_rate() {
    let alert = eval_rule(
        &OxygenSaturationRule::default(),
        &[
            (VitalSign::Saturation, 97.0, NOW_MS - 5 * MINUTE_MS),
            (VitalSign::Saturation, 94.0, NOW_MS),
        ],
    )
    .unwrap();

    // 3 points over 5 minutes: below the drop threshold, above the rate.
    assert_eq!(alert.condition, "Fast Oxygen Desaturation: 0.6%/minute");
}

#[test]
fn oxygen_critical_takes_precedence() {
    let alert = eval_rule(
        &OxygenSaturationRule::default(),
        &[
            (VitalSign::Saturation, 98.0, NOW_MS - 8 * MINUTE_MS),
            (VitalSign::Saturation, 91.0, NOW_MS - MINUTE_MS),
        ],
    )
    .unwrap();

    assert_eq!(alert.condition, "Critical Low Oxygen Saturation: 91%");
}

#[test]
fn oxygen_stable_is_silent() {
    assert!(eval_rule(
        &OxygenSaturationRule::default(),
        &[
            (VitalSign::Saturation, 97.0, NOW_MS - 6 * MINUTE_MS),
            (VitalSign::Saturation, 96.5, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::Saturation, 97.5, NOW_MS - MINUTE_MS),
        ],
    )
    .is_none());
}

#[test]
fn heart_rate_bradycardia() {
    let alert = eval_rule(
        &HeartRateRule::default(),
        &[(VitalSign::HeartRate, 45.0, NOW_MS - MINUTE_MS)],
    )
    .unwrap();

    assert_eq!(alert.condition, "Bradycardia Alert: 45 bpm");
}

#[test]
fn heart_rate_tachycardia() {
    let alert = eval_rule(
        &HeartRateRule::default(),
        &[(VitalSign::HeartRate, 120.0, NOW_MS - MINUTE_MS)],
    )
    .unwrap();

    assert_eq!(alert.condition, "Tachycardia Alert: 120 bpm");
}

#[test]
fn heart_rate_bounds_are_strict() {
    assert!(eval_rule(
        &HeartRateRule::default(),
        &[(VitalSign::HeartRate, 50.0, NOW_MS - MINUTE_MS)],
    )
    .is_none());
    assert!(eval_rule(
        &HeartRateRule::default(),
        &[(VitalSign::HeartRate, 100.0, NOW_MS - MINUTE_MS)],
    )
    .is_none());
}

#[test]
fn heart_rate_irregularity() {
    let alert = eval_rule(
        &HeartRateRule::default(),
        &[
            (VitalSign::HeartRate, 70.0, NOW_MS - 4 * MINUTE_MS),
            (VitalSign::HeartRate, 95.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::HeartRate, 68.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::HeartRate, 96.0, NOW_MS - MINUTE_MS),
            (VitalSign::HeartRate, 70.0, NOW_MS),
        ],
    )
    .unwrap();

    assert_eq!(alert.condition, "Irregular Heart Rate Detected");
    assert_eq!(alert.timestamp_ms, NOW_MS);
}

#[test]
fn heart_rate_regular_is_silent() {
    assert!(eval_rule(
        &HeartRateRule::default(),
        &[
            (VitalSign::HeartRate, 78.0, NOW_MS - 4 * MINUTE_MS),
            (VitalSign::HeartRate, 80.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::HeartRate, 79.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::HeartRate, 81.0, NOW_MS - MINUTE_MS),
            (VitalSign::HeartRate, 80.0, NOW_MS),
        ],
    )
    .is_none());
}

#[test]
fn heart_rate_irregularity_needs_min_samples() {
    // Wildly varying, but only four readings.
    assert!(eval_rule(
        &HeartRateRule::default(),
        &[
            (VitalSign::HeartRate, 70.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::HeartRate, 95.0, NOW_MS - 2 * MINUTE_MS),
            (VitalSign::HeartRate, 68.0, NOW_MS - MINUTE_MS),
            (VitalSign::HeartRate, 96.0, NOW_MS),
        ],
    )
    .is_none());
}

fn flat_ecg_with_spike() -> Vec<(VitalSign, f64, i64)> {
    let mut records: Vec<(VitalSign, f64, i64)> = (0..29)
        .map(|i| (VitalSign::Ecg, 0.0, NOW_MS - 30_000 + i * 1000))
        .collect();
    records.push((VitalSign::Ecg, 10.0, NOW_MS - 1000));
    records
}

#[test]
fn ecg_anomaly_fires_on_deviation() {
    let alert = eval_rule(&EcgAnomalyRule::default(), &flat_ecg_with_spike()).unwrap();

    assert_eq!(alert.condition, "ECG Anomaly: value 10, deviation 9.67 (σ=1.80)");
    assert_eq!(alert.timestamp_ms, NOW_MS - 1000);
}

#[test]
fn ecg_needs_full_sample_count() {
    let mut records = flat_ecg_with_spike();
    records.remove(0);
    assert!(eval_rule(&EcgAnomalyRule::default(), &records).is_none());
}

#[test]
fn ecg_flat_baseline_is_silent() {
    let records: Vec<(VitalSign, f64, i64)> = (0..30)
        .map(|i| (VitalSign::Ecg, 1.0, NOW_MS - 30_000 + i * 1000))
        .collect();
    assert!(eval_rule(&EcgAnomalyRule::default(), &records).is_none());
}

#[test]
fn manual_alert_triggered() {
    let alert = eval_rule(
        &ManualAlertRule::default(),
        &[(VitalSign::ManualAlert, 1.0, NOW_MS - 3 * MINUTE_MS)],
    )
    .unwrap();

    assert_eq!(alert.condition, "Manual Alert Triggered");
    assert_eq!(alert.timestamp_ms, NOW_MS - 3 * MINUTE_MS);
}

#[test]
fn manual_alert_outlives_resolution() {
    // A resolution record after the press does not cancel it; the press
    // keeps surfacing until it ages out of the window.
    let alert = eval_rule(
        &ManualAlertRule::default(),
        &[
            (VitalSign::ManualAlert, 1.0, NOW_MS - 3 * MINUTE_MS),
            (VitalSign::ManualAlert, 0.0, NOW_MS - MINUTE_MS),
        ],
    )
    .unwrap();

    assert_eq!(alert.timestamp_ms, NOW_MS - 3 * MINUTE_MS);
}

#[test]
fn manual_alert_resolution_only_is_silent() {
    assert!(eval_rule(
        &ManualAlertRule::default(),
        &[(VitalSign::ManualAlert, 0.0, NOW_MS - MINUTE_MS)],
    )
    .is_none());
}

#[test]
fn manual_alert_ages_out() {
    assert!(eval_rule(
        &ManualAlertRule::default(),
        &[(VitalSign::ManualAlert, 1.0, NOW_MS - 11 * MINUTE_MS)],
    )
    .is_none());
}

#[test]
fn evaluator_registers_defaults_in_order() {
    let evaluator = AlertEvaluator::with_default_rules();
    let names: Vec<&str> = evaluator.rules().iter().map(|r| r.name()).collect();
    assert_eq!(
        names,
        vec![
            "blood_pressure",
            "hypotensive_hypoxemia",
            "oxygen_saturation",
            "heart_rate",
            "ecg_anomaly",
            "manual_alert",
        ]
    );
}

#[test]
fn evaluator_co_fires_pressure_and_hypoxemia() {
    let directory = directory_with(&[
        (VitalSign::SystolicPressure, 85.0, NOW_MS - 2 * MINUTE_MS),
        (VitalSign::DiastolicPressure, 65.0, NOW_MS - 2 * MINUTE_MS),
        (VitalSign::Saturation, 90.0, NOW_MS - MINUTE_MS),
    ]);
    let evaluator = AlertEvaluator::with_default_rules();

    let conditions: Vec<String> = evaluator
        .evaluate(&directory.patient(1), NOW_MS)
        .into_iter()
        .map(|a| a.condition)
        .collect();

    // Output order is registration order, and the cross-signal rule
    // fires alongside the plain low-pressure finding.
    assert_eq!(
        conditions,
        vec![
            "Low Blood Pressure: 85/65 mmHg",
            "Hypotensive Hypoxemia: BP=85 mmHg, O2=90%",
            "Critical Low Oxygen Saturation: 90%",
        ]
    );
}

#[test]
fn evaluator_is_deterministic() {
    let directory = directory_with(&[
        (VitalSign::SystolicPressure, 85.0, NOW_MS - 2 * MINUTE_MS),
        (VitalSign::DiastolicPressure, 65.0, NOW_MS - 2 * MINUTE_MS),
        (VitalSign::Saturation, 90.0, NOW_MS - MINUTE_MS),
        (VitalSign::HeartRate, 120.0, NOW_MS - MINUTE_MS),
    ]);
    let evaluator = AlertEvaluator::with_default_rules();

    let first = evaluator.evaluate(&directory.patient(1), NOW_MS);
    let second = evaluator.evaluate(&directory.patient(1), NOW_MS);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn evaluator_is_silent_without_data() {
    let directory = PatientDirectory::new();
    let evaluator = AlertEvaluator::with_default_rules();
    assert!(evaluator.evaluate(&directory.patient(1), NOW_MS).is_empty());
}

#[test]
fn unknown_sign_records_trigger_nothing() {
    let directory = directory_with(&[
        (VitalSign::Other("Cholesterol".to_string()), 500.0, NOW_MS - MINUTE_MS),
        (VitalSign::Other("WhiteBloodCells".to_string()), 50.0, NOW_MS - MINUTE_MS),
    ]);
    let evaluator = AlertEvaluator::with_default_rules();
    assert!(evaluator.evaluate(&directory.patient(1), NOW_MS).is_empty());
}

#[test]
fn evaluate_prioritized_tags_each_rule() {
    let directory = directory_with(&[(VitalSign::Saturation, 90.0, NOW_MS - MINUTE_MS)]);
    let evaluator = AlertEvaluator::with_default_rules();

    let alerts = evaluator.evaluate_prioritized(&directory.patient(1), NOW_MS);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].priority(), Priority::Critical);
    assert_eq!(
        alerts[0].condition(),
        "[CRITICAL PRIORITY] Critical Low Oxygen Saturation: 90%"
    );
    // The inner alert stays unannotated.
    assert_eq!(alerts[0].inner().condition, "Critical Low Oxygen Saturation: 90%");
}

struct AlwaysFiringRule;

impl AlertRule for AlwaysFiringRule {
    fn name(&self) -> &str {
        "always"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn evaluate(&self, patient: &dyn PatientView, now_ms: i64) -> Option<Alert> {
        Some(Alert::new(patient.patient_id().to_string(), "Always", now_ms))
    }
}

#[test]
fn add_rule_appends_after_defaults() {
    let directory = PatientDirectory::new();
    let mut evaluator = AlertEvaluator::with_default_rules();
    evaluator.add_rule(Box::new(AlwaysFiringRule));
    assert_eq!(evaluator.rules().len(), 7);

    let alerts = evaluator.evaluate(&directory.patient(42), NOW_MS);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].condition, "Always");
    assert_eq!(alerts[0].patient_id, "42");
}
