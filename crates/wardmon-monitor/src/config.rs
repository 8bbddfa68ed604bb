use serde::Deserialize;

/// Monitor configuration, loaded from a TOML file.
///
/// Every key is optional; an empty file (or no file at all) yields the
/// built-in defaults. Intervals are in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Number of simulated patients. Patient ids run from 1 to this count.
    #[serde(default = "default_patient_count")]
    pub patient_count: u32,
    #[serde(default = "default_ecg_interval")]
    pub ecg_interval_secs: u64,
    #[serde(default = "default_saturation_interval")]
    pub saturation_interval_secs: u64,
    #[serde(default = "default_pressure_interval")]
    pub pressure_interval_secs: u64,
    #[serde(default = "default_levels_interval")]
    pub levels_interval_secs: u64,
    #[serde(default = "default_manual_interval")]
    pub manual_interval_secs: u64,
    /// How often each patient's rule set is re-evaluated.
    #[serde(default = "default_evaluation_interval")]
    pub evaluation_interval_secs: u64,
    /// Spacing between re-announcements of an unacknowledged critical alert.
    #[serde(default = "default_repeat_interval")]
    pub repeat_interval_secs: u64,
    /// How many times a critical alert is re-announced before it is dropped.
    #[serde(default = "default_max_repeats")]
    pub max_repeats: u32,
    #[serde(default = "default_console_alerts")]
    pub console_alerts: bool,
    /// Optional CSV file the alerts are appended to.
    #[serde(default)]
    pub alert_log: Option<String>,
}

fn default_patient_count() -> u32 {
    50
}

fn default_ecg_interval() -> u64 {
    1
}

fn default_saturation_interval() -> u64 {
    1
}

fn default_pressure_interval() -> u64 {
    60
}

fn default_levels_interval() -> u64 {
    120
}

fn default_manual_interval() -> u64 {
    20
}

fn default_evaluation_interval() -> u64 {
    10
}

fn default_repeat_interval() -> u64 {
    30
}

fn default_max_repeats() -> u32 {
    3
}

fn default_console_alerts() -> bool {
    true
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            patient_count: default_patient_count(),
            ecg_interval_secs: default_ecg_interval(),
            saturation_interval_secs: default_saturation_interval(),
            pressure_interval_secs: default_pressure_interval(),
            levels_interval_secs: default_levels_interval(),
            manual_interval_secs: default_manual_interval(),
            evaluation_interval_secs: default_evaluation_interval(),
            repeat_interval_secs: default_repeat_interval(),
            max_repeats: default_max_repeats(),
            console_alerts: default_console_alerts(),
            alert_log: None,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MonitorConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
