//! Triage CLI binary.
//!
//! Evaluates patient records from a JSON file (one record or an array) and
//! prints the resulting triage decisions as JSON. Batch input fans out
//! across cores; every record is evaluated against the same immutable
//! protocol with no synchronization.

use std::process::ExitCode;

use rayon::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_engine::{Protocol, TriageEngine};
use triage_types::{PatientRecord, TriageResult};

const PROTOCOL_PATH_VAR: &str = "TRIAGE_PROTOCOL_PATH";

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let Some(input_path) = std::env::args().nth(1) else {
        eprintln!("usage: triage <patients.json>");
        eprintln!("  {PROTOCOL_PATH_VAR}=<file> applies protocol overrides");
        return ExitCode::FAILURE;
    };

    // Build the protocol once; overrides fail the process before any
    // record is evaluated.
    let protocol = match std::env::var(PROTOCOL_PATH_VAR) {
        Ok(path) => {
            tracing::info!("loading protocol overrides from: {}", path);
            match Protocol::from_json_file(&path) {
                Ok(protocol) => protocol,
                Err(e) => {
                    tracing::error!("invalid protocol file: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        Err(_) => Protocol::builtin(),
    };
    let engine = TriageEngine::with_protocol(protocol);

    let text = match std::fs::read_to_string(&input_path) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("cannot read {}: {}", input_path, e);
            return ExitCode::FAILURE;
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("{} is not valid JSON: {}", input_path, e);
            return ExitCode::FAILURE;
        }
    };

    let output = if value.is_array() {
        let patients: Vec<PatientRecord> = match serde_json::from_value(value) {
            Ok(patients) => patients,
            Err(e) => {
                tracing::error!("invalid patient record in batch: {}", e);
                return ExitCode::FAILURE;
            }
        };
        tracing::info!("evaluating {} records", patients.len());
        let results: Vec<TriageResult> = patients
            .par_iter()
            .map(|patient| engine.evaluate(patient))
            .collect();
        let alerts = results.iter().filter(|r| r.level.requires_alert()).count();
        tracing::info!("done: {} records, {} at alert level", results.len(), alerts);
        serde_json::to_value(results)
    } else {
        let patient: PatientRecord = match serde_json::from_value(value) {
            Ok(patient) => patient,
            Err(e) => {
                tracing::error!("invalid patient record: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let result = engine.evaluate(&patient);
        tracing::info!(
            "level {} ({}) in {}",
            result.level.as_u8(),
            result.label_en,
            result.time_to_physician
        );
        serde_json::to_value(result)
    };

    match output.and_then(|value| serde_json::to_string_pretty(&value)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("failed to serialize results: {}", e);
            ExitCode::FAILURE
        }
    }
}
