//! In-memory vital-sign storage: one append-only timeline per patient,
//! all timelines behind a concurrent [`directory::PatientDirectory`].
//!
//! Ingestion never rejects a record and performs no I/O; queries over
//! unknown patients return empty results rather than errors. Each
//! timeline sits behind its own lock, so writers for different patients
//! do not serialize through a single point.

pub mod directory;
pub mod timeline;


pub use directory::{PatientDirectory, PatientHandle};
pub use timeline::PatientTimeline;

use wardmon_common::types::{PatientId, VitalSign};

/// Parameters for a time-range query, scoped to a single patient and
/// vital sign. Bounds are inclusive on both ends.
///
/// # Examples
///
/// ```
/// use wardmon_storage::VitalQuery;
/// use wardmon_common::types::VitalSign;
///
/// let query = VitalQuery {
///     patient_id: 7,
///     sign: VitalSign::HeartRate,
///     from_ms: 0,
///     to_ms: 600_000,
/// };
/// assert_eq!(query.sign, VitalSign::HeartRate);
/// ```
#[derive(Debug, Clone)]
pub struct VitalQuery {
    pub patient_id: PatientId,
    pub sign: VitalSign,
    pub from_ms: i64,
    pub to_ms: i64,
}
