use async_trait::async_trait;
use wardmon_common::alert::Alert;
use wardmon_common::types::format_timestamp_ms;

use crate::error::Result;
use crate::AlertSink;

/// Writes one line per alert to standard output, the ward-station view:
///
/// ```text
/// ALERT: Critical Low Oxygen Saturation: 88% for Patient 12 at 2024-05-01 14:03:27
/// ```
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertSink for ConsoleSink {
    async fn deliver(&self, alert: &Alert) -> Result<()> {
        println!(
            "ALERT: {} for Patient {} at {}",
            alert.condition,
            alert.patient_id,
            format_timestamp_ms(alert.timestamp_ms)
        );
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "console"
    }
}
