//! # PediCare Core
//!
//! The decision rules behind the PediCare pediatric front-end.
//!
//! Every screen of the front-end is a form that reads user input and renders
//! derived text. The rules that turn that input into an answer live here, as
//! pure functions over explicit input structs:
//!
//! - [`TriageEngine`]: questionnaire response -> urgency level and care flow
//! - [`GrowthClassifier`]: weight, height, age and sex -> BMI category
//! - [`vaccination`], [`emergency`], [`booking`], [`locations`]: dashboard
//!   and form rules
//! - [`report`]: plain-text rendering of results
//!
//! The crate performs no I/O, keeps no state between calls and never logs.
//! Presentation state (current questionnaire step, selected child, timers)
//! is owned by the caller.

pub mod booking;
pub mod emergency;
pub mod error;
pub mod growth;
pub mod locations;
pub mod report;
pub mod triage;
pub mod vaccination;

pub use booking::{Appointment, AppointmentRequest, BookingError, Doctor};
pub use emergency::{AmbulanceStatus, DispatchTimeline, EmergencyType};
pub use error::CoreError;
pub use growth::{
    BmiCategory, GrowthClassifier, GrowthForm, GrowthInput, GrowthResult, Sex, ValidationError,
};
pub use locations::Hospital;
pub use report::Report;
pub use triage::{
    Behavior, CareFlow, FeverLevel, Severity, SymptomDuration, SymptomResponse, TriageEngine,
    TriageLevel, TriageResult,
};
pub use vaccination::{VaccinationRecord, VaccinationSummary, Vaccine, VaccineStatus};
