use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wardmon_common::types::{PatientId, VitalRecord, VitalSign};

use crate::VitalGenerator;

/// Staff alert-button presses as a per-patient two-state machine.
///
/// A resolved patient triggers with probability `1 - e^(-lambda)` per
/// tick (at least one arrival of a Poisson process with rate `lambda`),
/// emitting value 1.0. A triggered patient resolves with probability
/// `resolve_chance` per tick, emitting value 0.0. Ticks without a state
/// change emit nothing, so the record stream carries transitions only.
pub struct ManualAlertGenerator {
    rng: StdRng,
    pressed: Vec<bool>,
    pub lambda: f64,
    pub resolve_chance: f64,
}

impl ManualAlertGenerator {
    pub fn new(patient_count: usize) -> Self {
        Self::with_rng(patient_count, StdRng::from_entropy())
    }

    pub fn seeded(patient_count: usize, seed: u64) -> Self {
        Self::with_rng(patient_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(patient_count: usize, rng: StdRng) -> Self {
        Self {
            rng,
            pressed: vec![false; patient_count + 1],
            lambda: 0.1,
            resolve_chance: 0.9,
        }
    }
}

impl VitalGenerator for ManualAlertGenerator {
    fn name(&self) -> &str {
        "manual_alert"
    }

    fn generate(&mut self, patient_id: PatientId, now_ms: i64) -> Vec<VitalRecord> {
        let index = patient_id as usize;
        if index == 0 || index >= self.pressed.len() {
            return Vec::new();
        }

        if self.pressed[index] {
            if self.rng.gen_bool(self.resolve_chance) {
                self.pressed[index] = false;
                return vec![VitalRecord::new(
                    patient_id,
                    VitalSign::ManualAlert,
                    0.0,
                    now_ms,
                )];
            }
        } else {
            let trigger_probability = -(-self.lambda).exp_m1();
            if self.rng.gen_bool(trigger_probability) {
                self.pressed[index] = true;
                return vec![VitalRecord::new(
                    patient_id,
                    VitalSign::ManualAlert,
                    1.0,
                    now_ms,
                )];
            }
        }
        Vec::new()
    }
}
