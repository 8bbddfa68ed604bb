//! Alert delivery framework with pluggable sink support.
//!
//! Flattened alerts are handed to one or more [`AlertSink`]
//! implementations by the [`manager::DeliveryManager`]. Built-in sinks
//! cover the console, an append-only log file, and an in-memory buffer
//! for tests and embedding.

pub mod error;
pub mod manager;
pub mod sinks;


pub use error::NotifyError;
pub use manager::DeliveryManager;

use async_trait::async_trait;
use wardmon_common::alert::Alert;

/// A delivery target for alerts.
///
/// Sinks receive the plain [`Alert`] triple with all annotation
/// decoration already rendered into the condition text, so a sink never
/// needs to know about priorities or repetition.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Delivers one alert through this sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot accept the alert; the
    /// delivery manager logs the failure and moves on.
    async fn deliver(&self, alert: &Alert) -> error::Result<()>;

    /// Returns the sink type name (e.g. `"console"`, `"file"`).
    fn sink_name(&self) -> &str;
}
