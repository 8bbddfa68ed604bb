use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wardmon_common::types::{PatientId, VitalRecord, VitalSign};

use crate::VitalGenerator;

/// Laboratory blood counts: cholesterol, white cells, red cells.
///
/// Each patient keeps a fixed baseline per analyte (cholesterol 150-200
/// mg/dL, white cells 4-10 x10^9/L, red cells 4.5-6 x10^12/L) and every
/// tick emits the baseline plus small symmetric noise. The type strings
/// are outside the canonical vital-sign set on purpose: these records
/// travel the storage path as [`VitalSign::Other`] values and no
/// built-in rule matches them.
pub struct BloodLevelsGenerator {
    rng: StdRng,
    cholesterol: Vec<f64>,
    white_cells: Vec<f64>,
    red_cells: Vec<f64>,
}

impl BloodLevelsGenerator {
    pub fn new(patient_count: usize) -> Self {
        Self::with_rng(patient_count, StdRng::from_entropy())
    }

    pub fn seeded(patient_count: usize, seed: u64) -> Self {
        Self::with_rng(patient_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(patient_count: usize, mut rng: StdRng) -> Self {
        let mut cholesterol = vec![0.0; patient_count + 1];
        let mut white_cells = vec![0.0; patient_count + 1];
        let mut red_cells = vec![0.0; patient_count + 1];
        for i in 1..=patient_count {
            cholesterol[i] = rng.gen_range(150.0..=200.0);
            white_cells[i] = rng.gen_range(4.0..=10.0);
            red_cells[i] = rng.gen_range(4.5..=6.0);
        }
        Self {
            rng,
            cholesterol,
            white_cells,
            red_cells,
        }
    }
}

impl VitalGenerator for BloodLevelsGenerator {
    fn name(&self) -> &str {
        "blood_levels"
    }

    fn generate(&mut self, patient_id: PatientId, now_ms: i64) -> Vec<VitalRecord> {
        let index = patient_id as usize;
        if index == 0 || index >= self.cholesterol.len() {
            return Vec::new();
        }

        let cholesterol = self.cholesterol[index] + self.rng.gen_range(-5.0..=5.0);
        let white_cells = self.white_cells[index] + self.rng.gen_range(-0.5..=0.5);
        let red_cells = self.red_cells[index] + self.rng.gen_range(-0.1..=0.1);

        vec![
            VitalRecord::new(patient_id, VitalSign::from("Cholesterol"), cholesterol, now_ms),
            VitalRecord::new(patient_id, VitalSign::from("WhiteBloodCells"), white_cells, now_ms),
            VitalRecord::new(patient_id, VitalSign::from("RedBloodCells"), red_cells, now_ms),
        ]
    }
}
