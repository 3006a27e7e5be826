//! # CLI Module
//!
//! Command-line interface for PediCare.
//!
//! Every command prints either the boxed text report or, with `--json`, the
//! result as pretty JSON on stdout. The `cmd_*` functions also return the
//! computed value so tests can inspect it.

use crate::error::AppError;
use crate::simulation::spawn_dispatch;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pedicare_core::booking::{DOCTORS, TIME_SLOTS};
use pedicare_core::locations;
use pedicare_core::vaccination::sample_record;
use pedicare_core::{
    AmbulanceStatus, Appointment, AppointmentRequest, Behavior, Doctor, DispatchTimeline,
    FeverLevel, GrowthClassifier, GrowthForm, GrowthResult, Hospital, Report, Severity,
    SymptomDuration, SymptomResponse, TriageEngine, TriageResult, VaccinationRecord,
    VaccinationSummary,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "pedicare")]
#[command(author, version, about = "PediCare - pediatric symptom triage and growth checks")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a symptom questionnaire
    Triage {
        /// JSON questionnaire response (instead of answer flags)
        #[arg(short, long, conflicts_with_all = ["fever", "symptom", "duration", "severity", "behavior"])]
        input: Option<PathBuf>,

        #[command(flatten)]
        answers: TriageFlags,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Compute and classify a child's BMI
    Growth {
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<String>,

        /// Height in centimetres
        #[arg(long)]
        height: Option<String>,

        /// Age in years
        #[arg(long)]
        age: Option<String>,

        /// male or female
        #[arg(long)]
        sex: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show vaccination progress
    Vaccines {
        /// JSON vaccination record (defaults to the sample record)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Show the ambulance dispatch timeline
    Ambulance {
        /// Play the timeline in real time
        #[arg(long)]
        follow: bool,

        #[arg(long)]
        json: bool,
    },

    /// Request an appointment
    Book {
        /// Doctor id (see `pedicare doctors`)
        #[arg(long)]
        doctor: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Time slot, e.g. "10:30 AM"
        #[arg(long)]
        time: String,

        #[arg(long)]
        json: bool,
    },

    /// Search the hospital directory
    Hospitals {
        /// Case-insensitive text matched against name, city and address
        #[arg(short, long)]
        query: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// List doctors and time slots
    Doctors {
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides PEDICARE_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PEDICARE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Questionnaire answers given as flags.
///
/// Unlike the raw answers accepted by the API, flags are parsed strictly:
/// an unrecognised option is an error.
#[derive(Args, Debug, Clone, Default)]
pub struct TriageFlags {
    /// none, mild, high or very-high
    #[arg(long)]
    pub fever: Option<String>,

    /// Checked symptom label (repeatable)
    #[arg(long = "symptom")]
    pub symptom: Vec<String>,

    /// less-than-day, one-to-two-days, three-to-five-days or over-week
    #[arg(long)]
    pub duration: Option<String>,

    /// 1 (mild) to 5 (severe)
    #[arg(long)]
    pub severity: Option<u8>,

    /// normal, slightly-less-active, very-tired or extremely-lethargic
    #[arg(long)]
    pub behavior: Option<String>,
}

impl TriageFlags {
    pub fn to_response(&self) -> Result<SymptomResponse, AppError> {
        let mut response = SymptomResponse::new();
        if let Some(fever) = &self.fever {
            response = response.with_fever(fever.parse::<FeverLevel>()?);
        }
        for symptom in &self.symptom {
            response = response.with_symptom(symptom.trim());
        }
        if let Some(duration) = &self.duration {
            response = response.with_duration(duration.parse::<SymptomDuration>()?);
        }
        if let Some(severity) = self.severity {
            response = response.with_severity(Severity::new(severity)?);
        }
        if let Some(behavior) = &self.behavior {
            response = response.with_behavior(behavior.parse::<Behavior>()?);
        }
        Ok(response)
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn emit<T: Serialize>(value: &T, report: impl FnOnce() -> Report, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", report().to_text());
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Classify a questionnaire read from `input`, or built from `flags`.
pub fn cmd_triage(
    input: Option<&Path>,
    flags: &TriageFlags,
    json: bool,
) -> Result<TriageResult, AppError> {
    let response = match input {
        Some(path) => {
            debug!(path = %path.display(), "reading questionnaire");
            read_json::<SymptomResponse>(path)?
        }
        None => flags.to_response()?,
    };

    let result = TriageEngine::classify(&response);
    info!(level = %result.level, "triage classified");
    emit(&result, || Report::from_triage(&result), json)?;
    Ok(result)
}

pub fn cmd_growth(form: &GrowthForm, json: bool) -> Result<GrowthResult, AppError> {
    let result = GrowthClassifier::classify_form(form).map_err(|e| {
        debug!(field = %e.field, reason = ?e.reason, "growth form rejected");
        e
    })?;
    info!(category = %result.category, "growth classified");
    emit(&result, || Report::from_growth(&result), json)?;
    Ok(result)
}

#[derive(Serialize)]
struct VaccinesOutput<'a> {
    child: &'a str,
    summary: VaccinationSummary,
    pending: Vec<&'a pedicare_core::Vaccine>,
}

/// Summarise the record at `input`, or the sample record.
pub fn cmd_vaccines(input: Option<&Path>, json: bool) -> Result<VaccinationSummary, AppError> {
    let record: VaccinationRecord = match input {
        Some(path) => read_json(path)?,
        None => sample_record(),
    };

    let summary = record.summary();
    let output = VaccinesOutput {
        child: &record.child.name,
        summary,
        pending: record.pending(),
    };
    emit(&output, || Report::from_vaccination(&record), json)?;
    Ok(summary)
}

/// Print the dispatch timeline without waiting.
pub fn cmd_timeline(json: bool) -> Result<DispatchTimeline, AppError> {
    let timeline = DispatchTimeline::default();
    emit(&timeline.entries(), || Report::from_timeline(&timeline), json)?;
    Ok(timeline)
}

/// Play `timeline` live, printing each status as it takes effect.
///
/// Ctrl-C cancels the simulation; the status reached so far is returned.
pub async fn cmd_ambulance_follow(timeline: DispatchTimeline) -> Result<AmbulanceStatus, AppError> {
    let handle = spawn_dispatch(timeline);
    let mut status = handle.subscribe();

    println!("{}", status.borrow_and_update().message());
    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", status.borrow_and_update().message());
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!(error = %e, "failed to listen for ctrl-c");
                }
                handle.cancel();
                println!("Cancelled.");
                break;
            }
        }
    }

    Ok(handle.wait().await)
}

fn parse_date(date: &str) -> Result<Option<NaiveDate>, AppError> {
    let date = date.trim();
    if date.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::InvalidDate(date.to_string()))
}

pub fn cmd_book(doctor: &str, date: &str, time: &str, json: bool) -> Result<Appointment, AppError> {
    let request = AppointmentRequest {
        doctor_id: Some(doctor.to_string()),
        date: parse_date(date)?,
        time_slot: Some(time.to_string()),
    };

    let appointment = request.confirm()?;
    info!(doctor = %appointment.doctor_id, date = %appointment.date, "appointment requested");
    emit(&appointment, || Report::from_appointment(&appointment), json)?;
    Ok(appointment)
}

/// List hospitals matching `query`; no query lists the whole directory.
pub fn cmd_hospitals(
    query: Option<&str>,
    json: bool,
) -> Result<Vec<&'static Hospital>, AppError> {
    let hospitals = locations::search(query.unwrap_or_default());
    debug!(matches = hospitals.len(), "hospital search");
    emit(&hospitals, || Report::from_hospitals(&hospitals), json)?;
    Ok(hospitals)
}

#[derive(Serialize)]
struct DirectoryOutput {
    doctors: &'static [Doctor],
    time_slots: &'static [&'static str],
}

pub fn cmd_doctors(json: bool) -> Result<&'static [Doctor], AppError> {
    let directory = DirectoryOutput {
        doctors: &DOCTORS,
        time_slots: &TIME_SLOTS,
    };
    emit(&directory, directory_report, json)?;
    Ok(&DOCTORS)
}

fn directory_report() -> Report {
    use pedicare_core::report::Section;

    let mut report = Report::new("Book Appointment");
    let mut doctors = Section::new("DOCTORS");
    for doctor in &DOCTORS {
        doctors.lines.push(format!(
            "[{}] {}, {} ({} yrs, {} stars, next: {})",
            doctor.id,
            doctor.name,
            doctor.speciality,
            doctor.experience_years,
            doctor.rating_display(),
            doctor.next_available
        ));
    }
    report.add_section(doctors);
    report.add_section(Section {
        heading: String::from("TIME SLOTS"),
        lines: vec![TIME_SLOTS.join(", ")],
    });
    report
}
