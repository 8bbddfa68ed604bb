use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use wardmon_common::alert::Alert;

use crate::error::Result;
use crate::AlertSink;

/// Appends one comma-separated line per alert to a log file:
/// `<timestamp_ms>,<patient_id>,<condition>`.
///
/// The file is opened for append on every delivery, so rotating or
/// truncating the log underneath a running monitor is safe.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl AlertSink for FileSink {
    async fn deliver(&self, alert: &Alert) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let line = format!(
            "{},{},{}\n",
            alert.timestamp_ms, alert.patient_id, alert.condition
        );
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "file"
    }
}
