use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wardmon_common::types::{PatientId, VitalRecord, VitalSign};

use crate::VitalGenerator;

/// Blood oxygen saturation as a slow random walk.
///
/// Each patient starts at a healthy baseline between 95 and 100 percent
/// and moves by -1, 0, or +1 per tick, clamped to [90, 100], so a
/// healthy simulated patient hovers near the top of the range without
/// tripping the critical threshold.
pub struct SaturationGenerator {
    rng: StdRng,
    last_values: Vec<f64>,
}

impl SaturationGenerator {
    pub fn new(patient_count: usize) -> Self {
        Self::with_rng(patient_count, StdRng::from_entropy())
    }

    pub fn seeded(patient_count: usize, seed: u64) -> Self {
        Self::with_rng(patient_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(patient_count: usize, mut rng: StdRng) -> Self {
        // Index 0 stays unused so patient ids map directly to slots.
        let mut last_values = vec![0.0; patient_count + 1];
        for value in last_values.iter_mut().skip(1) {
            *value = rng.gen_range(95..=100) as f64;
        }
        Self { rng, last_values }
    }
}

impl VitalGenerator for SaturationGenerator {
    fn name(&self) -> &str {
        "saturation"
    }

    fn generate(&mut self, patient_id: PatientId, now_ms: i64) -> Vec<VitalRecord> {
        let index = patient_id as usize;
        if index == 0 || index >= self.last_values.len() {
            return Vec::new();
        }

        let variation = self.rng.gen_range(-1..=1) as f64;
        let value = (self.last_values[index] + variation).clamp(90.0, 100.0);
        self.last_values[index] = value;

        vec![VitalRecord::new(
            patient_id,
            VitalSign::Saturation,
            value,
            now_ms,
        )]
    }
}
