//! Shared value types for the wardmon patient monitoring system.
//!
//! [`types`] holds the measurement-side vocabulary ([`types::VitalSign`],
//! [`types::VitalRecord`]); [`alert`] holds the alert model: the immutable
//! [`alert::Alert`] triple and the composable annotations
//! ([`alert::PriorityAlert`], [`alert::RepeatingAlert`]) that decorate the
//! rendered condition without touching the inner alert.

pub mod alert;
pub mod types;
