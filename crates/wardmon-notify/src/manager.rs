use wardmon_common::alert::Alert;

use crate::AlertSink;

/// Fans one alert out to every registered sink.
///
/// Delivery is best-effort without retry: a failing sink is logged and
/// skipped, and must never affect other sinks, other alerts, or the
/// evaluation that produced the alert.
pub struct DeliveryManager {
    sinks: Vec<Box<dyn AlertSink>>,
}

impl DeliveryManager {
    pub fn new(sinks: Vec<Box<dyn AlertSink>>) -> Self {
        Self { sinks }
    }

    pub fn add_sink(&mut self, sink: Box<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    pub fn sinks(&self) -> &[Box<dyn AlertSink>] {
        &self.sinks
    }

    /// Delivers the alert to every sink in registration order; returns
    /// the number of successful deliveries.
    pub async fn dispatch(&self, alert: &Alert) -> usize {
        let mut delivered = 0;
        for sink in &self.sinks {
            match sink.deliver(alert).await {
                Ok(()) => delivered += 1,
                Err(error) => {
                    tracing::warn!(
                        sink = sink.sink_name(),
                        error = %error,
                        patient_id = %alert.patient_id,
                        "Failed to deliver alert"
                    );
                }
            }
        }
        delivered
    }
}
