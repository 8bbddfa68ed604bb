//! Built-in rule strategies carrying the canonical clinical thresholds.
//!
//! Every threshold, window length, and sample count is a plain public
//! field whose `Default` holds the canonical value, so operators can
//! register differently tuned instances alongside the defaults.

pub mod blood_pressure;
pub mod ecg;
pub mod heart_rate;
pub mod hypotensive_hypoxemia;
pub mod manual;
pub mod oxygen_saturation;

pub use blood_pressure::BloodPressureRule;
pub use ecg::EcgAnomalyRule;
pub use heart_rate::HeartRateRule;
pub use hypotensive_hypoxemia::HypotensiveHypoxemiaRule;
pub use manual::ManualAlertRule;
pub use oxygen_saturation::OxygenSaturationRule;

/// Ten minutes in milliseconds, the default trailing window shared by
/// most strategies.
pub const DEFAULT_WINDOW_MS: i64 = 10 * 60 * 1000;
