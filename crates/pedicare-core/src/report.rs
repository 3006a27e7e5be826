//! # Report Module
//!
//! Plain-text rendering of results for terminal output.
//!
//! A [`Report`] is a title plus headed sections of lines. Builders exist for
//! each result type; [`Report::to_text`] renders the boxed template used by
//! the CLI. JSON output does not go through this module.

use crate::booking::Appointment;
use crate::emergency::DispatchTimeline;
use crate::growth::{GrowthResult, DISCLAIMER};
use crate::locations::Hospital;
use crate::triage::{TriageResult, CARE_TIPS};
use crate::vaccination::VaccinationRecord;
use serde::{Deserialize, Serialize};

/// A headed group of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Printed on its own row above the lines.
    pub heading: String,
    /// Printed as "- line" rows; an empty list renders as "(none)".
    pub lines: Vec<String>,
}

impl Section {
    /// Create a section with no lines.
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    /// Append a line (builder style).
    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// A titled report ready for terminal rendering.
///
/// Reports carry display text only; the structured result stays with the
/// caller for JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Printed in the top row of the box.
    pub title: String,
    /// Printed in order, each under a divider.
    pub sections: Vec<Section>,
}

impl Report {
    /// Create an empty report.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section after the existing ones.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check whether no section has any lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.lines.is_empty())
    }

    /// Recommendation for the triage level, then the general care tips.
    pub fn from_triage(result: &TriageResult) -> Self {
        let mut report = Self::new("Assessment Complete");
        let mut recommendation = Section::new(format!("RECOMMENDATION ({})", result.level))
            .line(result.recommended_action.clone())
            .line(result.description.clone())
            .line(format!("Next step: {}", result.action_label));
        if let Some(route) = result.care_flow.route() {
            recommendation = recommendation.line(format!("Go to: {route}"));
        }
        report.add_section(recommendation);

        let mut tips = Section::new("GENERAL CARE TIPS");
        tips.lines.extend(CARE_TIPS.iter().map(|tip| tip.to_string()));
        report.add_section(tips);
        report
    }

    /// BMI, category and percentile hint, then the disclaimer.
    pub fn from_growth(result: &GrowthResult) -> Self {
        let mut report = Self::new("BMI Calculator");
        report.add_section(
            Section::new("RESULT")
                .line(format!("BMI: {:.2}", result.bmi))
                .line(format!("Category: {}", result.category))
                .line(format!("Percentile: {}", result.percentile_hint)),
        );
        report.add_section(Section::new("DISCLAIMER").line(DISCLAIMER));
        report
    }

    /// Progress counts, then the pending vaccines in due-date order.
    pub fn from_vaccination(record: &VaccinationRecord) -> Self {
        let summary = record.summary();
        let mut report = Self::new(format!("Vaccinations - {}", record.child.name));
        report.add_section(
            Section::new("PROGRESS")
                .line(format!(
                    "{} of {} vaccines completed ({}%)",
                    summary.completed, summary.total, summary.completion_percent
                ))
                .line(format!(
                    "Due: {}  Overdue: {}  Upcoming: {}",
                    summary.due, summary.overdue, summary.upcoming
                )),
        );

        let mut pending = Section::new("PENDING");
        for vaccine in record.pending() {
            let due = vaccine
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| String::from("no date"));
            pending
                .lines
                .push(format!("{} [{}, due {}]", vaccine.name, vaccine.status, due));
        }
        if pending.lines.is_empty() {
            pending.lines.push(String::from("(none)"));
        }
        report.add_section(pending);
        report
    }

    /// Every status the dispatch passes through, with its offset.
    pub fn from_timeline(timeline: &DispatchTimeline) -> Self {
        let mut section = Section::new("AMBULANCE STATUS");
        for entry in timeline.entries() {
            section
                .lines
                .push(format!("+{}ms {}", entry.offset_ms, entry.message));
        }
        let mut report = Self::new("Emergency Activated");
        report.add_section(section);
        report
    }

    /// Doctor, date and slot of a confirmed appointment.
    pub fn from_appointment(appointment: &Appointment) -> Self {
        let mut report = Self::new("Appointment Booked Successfully!");
        report.add_section(
            Section::new("DETAILS")
                .line(format!(
                    "{} ({})",
                    appointment.doctor_name, appointment.speciality
                ))
                .line(format!("{} at {}", appointment.date, appointment.time_slot))
                .line(appointment.note.clone()),
        );
        report
    }

    /// One section per hospital, or a single "no match" section.
    pub fn from_hospitals(hospitals: &[&Hospital]) -> Self {
        let mut report = Self::new("Hospital Locations");
        if hospitals.is_empty() {
            report.add_section(Section::new("NO HOSPITALS FOUND"));
            return report;
        }
        for hospital in hospitals {
            let mut section = Section::new(hospital.name)
                .line(format!("{}, {}", hospital.address, hospital.city))
                .line(format!("{} | {}", hospital.phone, hospital.hours))
                .line(format!(
                    "Rating {} | {} away",
                    hospital.rating_display(),
                    hospital.distance
                ))
                .line(format!("Services: {}", hospital.services.join(", ")));
            if hospital.emergency {
                section = section.line("24/7 emergency department");
            }
            if hospital.pediatric_icu {
                section = section.line("Pediatric ICU");
            }
            report.add_section(
                section.line(format!("Directions: {}", hospital.directions_url())),
            );
        }
        report
    }

    /// Render with the boxed template.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str(&format!("│ {}\n", self.title));

        for section in &self.sections {
            output.push_str("├─────────────────────────────────────┤\n");
            output.push_str(&format!("│ {}\n", section.heading));
            if section.lines.is_empty() {
                output.push_str("│ - (none)\n");
            } else {
                for line in &section.lines {
                    output.push_str(&format!("│ - {}\n", line));
                }
            }
        }

        output.push_str("└─────────────────────────────────────┘\n");

        output
    }
}

// =============================================================================
// TESTS
// =============================================================================
