//! Task scheduling for the ward monitor.
//!
//! Each (patient, generator family) pair gets its own tokio task, staggered
//! by a random initial delay so a ward of patients does not tick in lock
//! step. Each patient additionally gets an evaluation task that runs the
//! rule set and dispatches whatever fires. A stall in one patient's
//! evaluation never holds up another's.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use wardmon_alert::evaluator::AlertEvaluator;
use wardmon_common::alert::{Alert, AlertView, Priority, PriorityAlert, RepeatingAlert};
use wardmon_common::types::{now_ms, PatientId};
use wardmon_notify::DeliveryManager;
use wardmon_simulator::VitalGenerator;
use wardmon_storage::PatientDirectory;

/// Upper bound on the random start-up delay for generator tasks.
const MAX_STAGGER_MS: u64 = 5_000;

/// Pending re-announcements of critical alerts for one patient.
///
/// Fresh critical alerts are enqueued after their first announcement and
/// re-dispatched on later evaluation ticks until their repeat budget is
/// spent. Entries survive the underlying readings, so a critical alert
/// keeps being re-announced even after the triggering data has aged out
/// of the rule window.
pub struct RepeatQueue {
    interval_ms: i64,
    max_repeats: u32,
    pending: Vec<RepeatingAlert<PriorityAlert<Alert>>>,
}

impl RepeatQueue {
    pub fn new(interval_ms: i64, max_repeats: u32) -> Self {
        Self {
            interval_ms,
            max_repeats,
            pending: Vec::new(),
        }
    }

    /// Enqueue a critical alert for re-announcement.
    ///
    /// A condition that is already pending word for word is not enqueued
    /// again; a persisting condition re-fires on every evaluation tick and
    /// would otherwise pile up duplicates.
    pub fn enqueue(&mut self, alert: PriorityAlert<Alert>) {
        let already_pending = self
            .pending
            .iter()
            .any(|pending| pending.inner().inner().condition == alert.inner().condition);
        if already_pending {
            return;
        }
        self.pending
            .push(RepeatingAlert::new(alert, self.interval_ms, self.max_repeats));
    }

    /// Alerts due for re-announcement at `now_ms`, rendered with their
    /// repeat count. Entries that have spent their budget are dropped.
    pub fn due(&mut self, now_ms: i64) -> Vec<Alert> {
        let mut due = Vec::new();
        for pending in &mut self.pending {
            if pending.should_repeat(now_ms) {
                due.push(pending.flatten());
            }
        }
        self.pending.retain(|pending| !pending.is_exhausted());
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Spawn one generator task per patient for a single vital family.
///
/// The family's generator is shared behind a mutex; its per-patient state
/// lives inside the generator itself, so tasks only contend for the brief
/// moment a reading is produced.
pub fn spawn_generator_family(
    directory: &Arc<PatientDirectory>,
    patient_count: u32,
    generator: Box<dyn VitalGenerator>,
    interval_secs: u64,
) -> Vec<JoinHandle<()>> {
    let family = generator.name().to_string();
    let generator = Arc::new(Mutex::new(generator));
    let tasks: Vec<JoinHandle<()>> = (1..=patient_count)
        .map(|patient_id| {
            let directory = Arc::clone(directory);
            let generator = Arc::clone(&generator);
            let stagger_ms = rand::thread_rng().gen_range(0..MAX_STAGGER_MS);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(stagger_ms)).await;
                let mut tick = tokio::time::interval(Duration::from_secs(interval_secs));
                loop {
                    tick.tick().await;
                    let now_ms = now_ms();
                    let records = generator.lock().await.generate(patient_id, now_ms);
                    for record in records {
                        directory.ingest_record(record);
                    }
                }
            })
        })
        .collect();
    tracing::debug!(
        family = %family,
        patients = patient_count,
        interval_secs,
        "Spawned generator tasks"
    );
    tasks
}

/// Spawn the evaluation task for one patient.
///
/// Every tick first re-announces any pending critical alerts, then runs
/// the full rule set over the patient's data and dispatches what fires.
/// Critical findings join the repeat queue after their announcement.
pub fn spawn_evaluation_task(
    directory: Arc<PatientDirectory>,
    evaluator: Arc<AlertEvaluator>,
    delivery: Arc<DeliveryManager>,
    patient_id: PatientId,
    evaluation_interval_secs: u64,
    repeat_interval_secs: u64,
    max_repeats: u32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(evaluation_interval_secs));
        let mut repeats = RepeatQueue::new(repeat_interval_secs as i64 * 1_000, max_repeats);
        loop {
            tick.tick().await;
            let now_ms = now_ms();

            for alert in repeats.due(now_ms) {
                delivery.dispatch(&alert).await;
            }

            let alerts = evaluator.evaluate_prioritized(&directory.patient(patient_id), now_ms);
            for alert in alerts {
                delivery.dispatch(&alert.flatten()).await;
                if alert.priority() == Priority::Critical {
                    repeats.enqueue(alert);
                }
            }
        }
    })
}
