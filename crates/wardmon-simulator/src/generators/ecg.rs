use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wardmon_common::types::{PatientId, VitalRecord, VitalSign};

use crate::VitalGenerator;

/// Synthetic ECG trace: a per-patient sinusoid plus uniform noise.
///
/// Each patient gets a fixed cardiac frequency between 1.0 and 1.7 Hz
/// (60-102 bpm) at construction; the sample value is the sinusoid at the
/// tick instant with noise in [-0.1, 0.1] on top. The waveform stays
/// well inside the anomaly rule's three-sigma envelope, so a healthy
/// trace does not alert.
pub struct EcgGenerator {
    rng: StdRng,
    frequencies_hz: Vec<f64>,
}

impl EcgGenerator {
    pub fn new(patient_count: usize) -> Self {
        Self::with_rng(patient_count, StdRng::from_entropy())
    }

    pub fn seeded(patient_count: usize, seed: u64) -> Self {
        Self::with_rng(patient_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(patient_count: usize, mut rng: StdRng) -> Self {
        let mut frequencies_hz = vec![0.0; patient_count + 1];
        for freq in frequencies_hz.iter_mut().skip(1) {
            *freq = rng.gen_range(1.0..=1.7);
        }
        Self {
            rng,
            frequencies_hz,
        }
    }
}

impl VitalGenerator for EcgGenerator {
    fn name(&self) -> &str {
        "ecg"
    }

    fn generate(&mut self, patient_id: PatientId, now_ms: i64) -> Vec<VitalRecord> {
        let index = patient_id as usize;
        if index == 0 || index >= self.frequencies_hz.len() {
            return Vec::new();
        }

        let t_secs = now_ms as f64 / 1000.0;
        let wave = (TAU * self.frequencies_hz[index] * t_secs).sin();
        let noise = self.rng.gen_range(-0.1..=0.1);

        vec![VitalRecord::new(
            patient_id,
            VitalSign::Ecg,
            wave + noise,
            now_ms,
        )]
    }
}
