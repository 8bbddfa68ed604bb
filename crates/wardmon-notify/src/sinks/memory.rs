use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wardmon_common::alert::Alert;

use crate::error::{NotifyError, Result};
use crate::AlertSink;

#[derive(Debug, Default)]
struct MemorySinkInner {
    delivered: Mutex<Vec<Alert>>,
    closed: AtomicBool,
}

/// Captures delivered alerts in memory, for tests and embedding.
///
/// Clones share the same buffer, so a test can keep one handle while a
/// [`DeliveryManager`](crate::manager::DeliveryManager) owns another.
/// [`close`](MemorySink::close) makes all subsequent deliveries fail,
/// which is how delivery-failure handling gets exercised without real
/// I/O errors.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<MemorySinkInner>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far, in delivery order.
    pub fn delivered(&self) -> Vec<Alert> {
        self.inner
            .delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Rejects all future deliveries with [`NotifyError::Closed`].
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AlertSink for MemorySink {
    async fn deliver(&self, alert: &Alert) -> Result<()> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(NotifyError::Closed {
                sink: self.sink_name().to_string(),
            });
        }
        self.inner
            .delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(alert.clone());
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "memory"
    }
}
