//! The built-in generator families.
//!
//! All generators are constructed for a roster of `patient_count`
//! patients with ids `1..=patient_count`. [`seeded`](SaturationGenerator::seeded)
//! constructors take an explicit RNG seed so tests can pin the exact
//! sequence; `new` seeds from entropy.

pub mod blood_levels;
pub mod blood_pressure;
pub mod ecg;
pub mod manual_alert;
pub mod saturation;

pub use blood_levels::BloodLevelsGenerator;
pub use blood_pressure::BloodPressureGenerator;
pub use ecg::EcgGenerator;
pub use manual_alert::ManualAlertGenerator;
pub use saturation::SaturationGenerator;
