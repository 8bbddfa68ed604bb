//! Synthetic vital-sign producers for the wardmon monitor.
//!
//! Each [`VitalGenerator`] implementation simulates one family of
//! measurements (saturation, blood pressure, ECG, blood levels, manual
//! alert presses) for a fixed roster of patients, holding per-patient
//! state so consecutive readings drift realistically instead of jumping.

pub mod generators;


use wardmon_common::types::{PatientId, VitalRecord};

/// A measurement producer driven by the monitor's scheduling loop.
///
/// Implementations hold mutable per-patient state (baselines, walk
/// positions, trigger flags), so the loop calls them behind a lock. The
/// tick instant is passed in as `now_ms` and stamped onto every record.
pub trait VitalGenerator: Send {
    /// Generator family name (e.g. `"saturation"`), used for logging and
    /// task naming.
    fn name(&self) -> &str;

    /// Produces this tick's records for one patient.
    ///
    /// May be empty: some generators only emit on state transitions.
    /// Patient ids outside the roster the generator was built for
    /// produce nothing.
    fn generate(&mut self, patient_id: PatientId, now_ms: i64) -> Vec<VitalRecord>;
}
