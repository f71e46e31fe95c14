//! oncoqueue Oncology Clinic Reference Runtime: demo CLI
//!
//! Runs the reference clinic scenarios, resolves a single triage decision
//! from the command line, or prepares a diagnosis request.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- after-hours
//!   cargo run -p demo -- resolve --stage "Stage 4" --temp 39.0 --heart 110 \
//!       --description "severe pain" --now "2024-03-11 18:30:00"
//!   cargo run -p demo -- diagnose --blood "150/95" --weight 82 --symptoms "headache"

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use oncoqueue_advisor::{diagnosis, AdvisorSettings};
use oncoqueue_contracts::{
    error::{OncoError, OncoResult},
    intake::PatientIntake,
    suggestion::coerce_priority,
    timestamp::{self, TIMESTAMP_FORMAT},
    triage::TriageResult,
};
use oncoqueue_core::{
    clock::SystemClock,
    traits::{Clock, TriagePolicy},
};
use oncoqueue_policy::engine::TomlTriagePolicy;
use oncoqueue_ref_clinic::{
    scenarios::{after_hours, ai_guided, fallback_scoring, queue_board},
    ONCOLOGY_POLICY,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// oncoqueue: oncology triage desk demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "oncoqueue oncology clinic reference demo",
    long_about = "Runs oncoqueue clinic scenarios showing advisor-guided triage,\n\
                  fallback scoring, after-hours scheduling, and the queue board."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four clinic scenarios in sequence.
    RunAll,
    /// Scenario 1: Advisor-guided triage (dates kept, capped, rejected).
    AiGuided,
    /// Scenario 2: Fallback scoring (advisor down or unreadable).
    FallbackScoring,
    /// Scenario 3: After-hours arrivals (next-morning slot).
    AfterHours,
    /// Scenario 4: Queue board (receipts, rejected intake, ordering).
    QueueBoard,
    /// Resolve priority and appointment for one patient.
    Resolve(ResolveArgs),
    /// Build the diagnosis prompt and request for a health form.
    Diagnose(DiagnoseArgs),
}

#[derive(clap::Args)]
struct ResolveArgs {
    /// Cancer stage text, e.g. "Stage 3".
    #[arg(long)]
    stage: String,
    /// Temperature in degrees Celsius.
    #[arg(long)]
    temp: f64,
    /// Heart rate in beats per minute.
    #[arg(long)]
    heart: i64,
    /// Symptom description.
    #[arg(long, default_value = "")]
    description: String,
    /// Advisor priority, as the advisor sent it (number or text).
    #[arg(long)]
    ai_priority: Option<String>,
    /// Advisor appointment date, YYYY-MM-DD.
    #[arg(long)]
    ai_date: Option<String>,
    /// Evaluate at this local time ("YYYY-MM-DD HH:MM:SS") instead of now.
    #[arg(long)]
    now: Option<String>,
    /// Policy TOML file; defaults to the built-in clinic policy.
    #[arg(long)]
    policy: Option<PathBuf>,
}

#[derive(clap::Args)]
struct DiagnoseArgs {
    /// Blood pressure, e.g. "120/80".
    #[arg(long)]
    blood: String,
    /// Weight in kilograms.
    #[arg(long)]
    weight: String,
    /// Free-text symptoms.
    #[arg(long)]
    symptoms: String,
    /// Policy TOML file holding the `[advisor]` table.
    #[arg(long)]
    policy: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see every resolution step.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => {
            print_banner();
            run_all()
        }
        Command::AiGuided => {
            print_banner();
            ai_guided::run_scenario()
        }
        Command::FallbackScoring => {
            print_banner();
            fallback_scoring::run_scenario()
        }
        Command::AfterHours => {
            print_banner();
            after_hours::run_scenario()
        }
        Command::QueueBoard => {
            print_banner();
            queue_board::run_scenario()
        }
        Command::Resolve(args) => run_resolve(args),
        Command::Diagnose(args) => run_diagnose(args),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> OncoResult<()> {
    ai_guided::run_scenario()?;
    fallback_scoring::run_scenario()?;
    after_hours::run_scenario()?;
    queue_board::run_scenario()?;
    println!("All scenarios completed successfully.");
    Ok(())
}

// ── Resolve ───────────────────────────────────────────────────────────────────

fn load_document(path: Option<&PathBuf>) -> OncoResult<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| OncoError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        }),
        None => Ok(ONCOLOGY_POLICY.to_string()),
    }
}

fn run_resolve(args: ResolveArgs) -> OncoResult<()> {
    let policy = match &args.policy {
        Some(path) => TomlTriagePolicy::from_file(path)?,
        None => TomlTriagePolicy::from_toml_str(ONCOLOGY_POLICY)?,
    };

    let now = match &args.now {
        Some(raw) => NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|e| {
            OncoError::InvalidField {
                field: "now".to_string(),
                reason: format!("expected YYYY-MM-DD HH:MM:SS: {}", e),
            }
        })?,
        None => SystemClock.now(),
    };

    let suggested = args.ai_priority.as_deref().and_then(|raw| {
        match coerce_priority(&Value::String(raw.to_string())) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(error = %e, "advisor priority ignored");
                None
            }
        }
    });

    let intake = PatientIntake {
        name: "command line".to_string(),
        email: "n/a".to_string(),
        age: 1,
        cancer_stage: args.stage,
        therapy_type: "n/a".to_string(),
        temperature: args.temp,
        heart_rate: args.heart,
        blood_pressure: "n/a".to_string(),
        description: args.description,
    };
    debug!(now = %timestamp::format(&now), ?suggested, "resolving from command line");

    let priority = policy.prioritize(&intake, suggested);
    let appointment = policy.schedule(priority.priority, now, args.ai_date.as_deref());
    let result = TriageResult {
        priority: priority.priority,
        appointment: appointment.appointment,
    };

    let report = json!({
        "result": result,
        "priority": priority,
        "appointment": appointment,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| report.to_string())
    );
    Ok(())
}

// ── Diagnose ──────────────────────────────────────────────────────────────────

fn run_diagnose(args: DiagnoseArgs) -> OncoResult<()> {
    let settings = AdvisorSettings::from_toml_str(&load_document(args.policy.as_ref())?)?;
    let form = diagnosis::HealthForm::new(&args.blood, &args.weight, &args.symptoms)?;
    let request = diagnosis::diagnosis_request(&settings.diagnosis, &form);

    println!("Prompt:");
    println!("{}", diagnosis::diagnosis_prompt(&form));
    println!();
    println!("Request (not sent; supply an API key in a host client to send it):");
    println!(
        "  POST {} (timeout {}s)",
        request.url, request.timeout_secs
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&request.body).unwrap_or_else(|_| request.body.to_string())
    );
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("oncoqueue: Oncology Triage Desk");
    println!("Clinic Reference Demo");
    println!("================================");
    println!();
    println!("Triage pipeline per intake:");
    println!("  [1] Intake form validated; missing or empty fields are rejected");
    println!("  [2] Advisor asked for a priority and appointment date");
    println!("  [3] Priority: advisor value clamped to 1-5, else heuristic fallback score");
    println!("  [4] Appointment: advisor date with urgency caps, else offset table");
    println!("  [5] After-hours urgent arrivals moved to the next morning");
    println!("  [6] Patient written to the treatment queue");
    println!();
}
