use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Patient identifier as assigned by the producing device or simulator.
pub type PatientId = u32;

/// The kind of physiological signal a measurement belongs to.
///
/// Parsing never fails: type strings outside the canonical set are kept
/// verbatim as [`VitalSign::Other`]. Such records are stored and queryable
/// like any other but no built-in rule matches them.
///
/// # Examples
///
/// ```
/// use wardmon_common::types::VitalSign;
///
/// let sign: VitalSign = "HeartRate".parse().unwrap();
/// assert_eq!(sign, VitalSign::HeartRate);
/// assert_eq!(sign.to_string(), "HeartRate");
///
/// let other: VitalSign = "Cholesterol".parse().unwrap();
/// assert_eq!(other, VitalSign::Other("Cholesterol".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VitalSign {
    SystolicPressure,
    DiastolicPressure,
    Saturation,
    HeartRate,
    Ecg,
    ManualAlert,
    Other(String),
}

impl std::fmt::Display for VitalSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VitalSign::SystolicPressure => write!(f, "SystolicPressure"),
            VitalSign::DiastolicPressure => write!(f, "DiastolicPressure"),
            VitalSign::Saturation => write!(f, "Saturation"),
            VitalSign::HeartRate => write!(f, "HeartRate"),
            VitalSign::Ecg => write!(f, "ECG"),
            VitalSign::ManualAlert => write!(f, "ManualAlert"),
            VitalSign::Other(name) => write!(f, "{name}"),
        }
    }
}

impl From<&str> for VitalSign {
    fn from(s: &str) -> Self {
        match s {
            "SystolicPressure" => VitalSign::SystolicPressure,
            "DiastolicPressure" => VitalSign::DiastolicPressure,
            "Saturation" => VitalSign::Saturation,
            "HeartRate" => VitalSign::HeartRate,
            "ECG" => VitalSign::Ecg,
            "ManualAlert" => VitalSign::ManualAlert,
            other => VitalSign::Other(other.to_string()),
        }
    }
}

impl From<String> for VitalSign {
    fn from(s: String) -> Self {
        VitalSign::from(s.as_str())
    }
}

impl From<VitalSign> for String {
    fn from(sign: VitalSign) -> Self {
        sign.to_string()
    }
}

impl std::str::FromStr for VitalSign {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(VitalSign::from(s))
    }
}

/// One immutable measurement: which patient, which signal, the value, and
/// when it was taken (epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalRecord {
    pub patient_id: PatientId,
    pub sign: VitalSign,
    pub value: f64,
    pub timestamp_ms: i64,
}

impl VitalRecord {
    pub fn new(patient_id: PatientId, sign: VitalSign, value: f64, timestamp_ms: i64) -> Self {
        Self {
            patient_id,
            sign,
            value,
            timestamp_ms,
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format an epoch-millisecond timestamp for human-readable output.
///
/// # Examples
///
/// ```
/// use wardmon_common::types::format_timestamp_ms;
///
/// assert_eq!(format_timestamp_ms(0), "1970-01-01 00:00:00");
/// ```
pub fn format_timestamp_ms(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("@{timestamp_ms}ms"),
    }
}
