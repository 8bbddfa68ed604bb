use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wardmon_common::types::{PatientId, VitalRecord, VitalSign};

use crate::VitalGenerator;

/// Paired systolic/diastolic blood pressure as two coupled random walks.
///
/// Baselines are drawn per patient (systolic 110-130, diastolic 70-85)
/// and each tick moves both values independently by up to +/-2 mmHg,
/// clamped to [90, 180] and [60, 120]. Every tick emits one systolic and
/// one diastolic record sharing the tick timestamp, which keeps the
/// cross-signal rules supplied with paired readings.
pub struct BloodPressureGenerator {
    rng: StdRng,
    systolic: Vec<f64>,
    diastolic: Vec<f64>,
}

impl BloodPressureGenerator {
    pub fn new(patient_count: usize) -> Self {
        Self::with_rng(patient_count, StdRng::from_entropy())
    }

    pub fn seeded(patient_count: usize, seed: u64) -> Self {
        Self::with_rng(patient_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(patient_count: usize, mut rng: StdRng) -> Self {
        let mut systolic = vec![0.0; patient_count + 1];
        let mut diastolic = vec![0.0; patient_count + 1];
        for i in 1..=patient_count {
            systolic[i] = rng.gen_range(110..=130) as f64;
            diastolic[i] = rng.gen_range(70..=85) as f64;
        }
        Self {
            rng,
            systolic,
            diastolic,
        }
    }
}

impl VitalGenerator for BloodPressureGenerator {
    fn name(&self) -> &str {
        "blood_pressure"
    }

    fn generate(&mut self, patient_id: PatientId, now_ms: i64) -> Vec<VitalRecord> {
        let index = patient_id as usize;
        if index == 0 || index >= self.systolic.len() {
            return Vec::new();
        }

        let systolic =
            (self.systolic[index] + self.rng.gen_range(-2..=2) as f64).clamp(90.0, 180.0);
        let diastolic =
            (self.diastolic[index] + self.rng.gen_range(-2..=2) as f64).clamp(60.0, 120.0);
        self.systolic[index] = systolic;
        self.diastolic[index] = diastolic;

        vec![
            VitalRecord::new(patient_id, VitalSign::SystolicPressure, systolic, now_ms),
            VitalRecord::new(patient_id, VitalSign::DiastolicPressure, diastolic, now_ms),
        ]
    }
}
