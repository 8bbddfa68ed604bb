//! Ward monitor binary: simulates a ward of patients, stores their vitals,
//! evaluates the alert rule set and dispatches whatever fires.

mod config;
mod scheduler;

use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wardmon_alert::evaluator::AlertEvaluator;
use wardmon_notify::sinks::{ConsoleSink, FileSink};
use wardmon_notify::{AlertSink, DeliveryManager};
use wardmon_simulator::generators::{
    BloodLevelsGenerator, BloodPressureGenerator, EcgGenerator, ManualAlertGenerator,
    SaturationGenerator,
};
use wardmon_storage::PatientDirectory;

use crate::config::MonitorConfig;

fn print_usage() {
    println!("Usage: wardmon-monitor [CONFIG_PATH]");
    println!();
    println!("Runs the ward monitor with the settings in CONFIG_PATH (TOML).");
    println!("Without an argument the built-in defaults apply: 50 patients,");
    println!("console alerts on, no alert log. See config/monitor.toml for");
    println!("the available keys.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wardmon=info".parse()?))
        .init();

    let config = match std::env::args().nth(1).as_deref() {
        Some("-h") | Some("--help") => {
            print_usage();
            return Ok(());
        }
        Some(path) => {
            info!(config = %path, "Loading monitor configuration");
            MonitorConfig::load(path)?
        }
        None => {
            info!("No configuration file given, using built-in defaults");
            MonitorConfig::default()
        }
    };

    let directory = Arc::new(PatientDirectory::new());
    let evaluator = Arc::new(AlertEvaluator::with_default_rules());

    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();
    if config.console_alerts {
        sinks.push(Box::new(ConsoleSink::new()));
    }
    if let Some(path) = &config.alert_log {
        info!(path = %path, "Appending alerts to log file");
        sinks.push(Box::new(FileSink::new(path)));
    }
    let delivery = Arc::new(DeliveryManager::new(sinks));

    let roster = config.patient_count as usize;
    let mut tasks = Vec::new();
    tasks.extend(scheduler::spawn_generator_family(
        &directory,
        config.patient_count,
        Box::new(SaturationGenerator::new(roster)),
        config.saturation_interval_secs,
    ));
    tasks.extend(scheduler::spawn_generator_family(
        &directory,
        config.patient_count,
        Box::new(BloodPressureGenerator::new(roster)),
        config.pressure_interval_secs,
    ));
    tasks.extend(scheduler::spawn_generator_family(
        &directory,
        config.patient_count,
        Box::new(EcgGenerator::new(roster)),
        config.ecg_interval_secs,
    ));
    tasks.extend(scheduler::spawn_generator_family(
        &directory,
        config.patient_count,
        Box::new(BloodLevelsGenerator::new(roster)),
        config.levels_interval_secs,
    ));
    tasks.extend(scheduler::spawn_generator_family(
        &directory,
        config.patient_count,
        Box::new(ManualAlertGenerator::new(roster)),
        config.manual_interval_secs,
    ));

    for patient_id in 1..=config.patient_count {
        tasks.push(scheduler::spawn_evaluation_task(
            Arc::clone(&directory),
            Arc::clone(&evaluator),
            Arc::clone(&delivery),
            patient_id,
            config.evaluation_interval_secs,
            config.repeat_interval_secs,
            config.max_repeats,
        ));
    }

    info!(
        patients = config.patient_count,
        rules = evaluator.rules().len(),
        tasks = tasks.len(),
        evaluation_interval_secs = config.evaluation_interval_secs,
        "Ward monitor running, press Ctrl+C to stop"
    );

    signal::ctrl_c().await?;
    info!("Shutting down gracefully");
    for task in &tasks {
        task.abort();
    }

    let patients = directory.patient_count();
    let records: usize = directory
        .patient_ids()
        .iter()
        .map(|id| directory.record_count(*id))
        .sum();
    info!(patients, records, "Final storage summary");
    Ok(())
}
