//! # Vaccination Module
//!
//! Vaccination tracking for the family dashboard.
//!
//! A [`VaccinationRecord`] holds one child's vaccines with a status each.
//! The dashboard needs the per-status counts, the completion percentage and
//! the pending vaccines in due-date order; all three are derived here.
//! Statuses are recorded, not computed from the calendar.

use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recorded state of one vaccine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaccineStatus {
    Completed,
    Due,
    Overdue,
    Upcoming,
}

impl fmt::Display for VaccineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "completed",
            Self::Due => "due",
            Self::Overdue => "overdue",
            Self::Upcoming => "upcoming",
        })
    }
}

/// Display priority. Does not affect counts or ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    #[default]
    Routine,
    Critical,
}

/// A vaccine in a child's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccine {
    /// Unique within a record; used by [`VaccinationRecord::mark_completed`].
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Recommended age window, as free text ("12-15 months").
    #[serde(default)]
    pub age_group: String,
    pub status: VaccineStatus,
    /// Orders the pending list; undated vaccines sort last.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Set when the vaccine is marked completed.
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub importance: Importance,
}

/// The child a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

/// One child's vaccines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    pub child: ChildProfile,
    #[serde(default)]
    pub vaccines: Vec<Vaccine>,
}

/// Counts shown by the progress card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationSummary {
    pub total: usize,
    pub completed: usize,
    pub due: usize,
    pub overdue: usize,
    pub upcoming: usize,
    /// `completed / total` as a whole percentage, rounded half up.
    pub completion_percent: u8,
}

impl VaccinationRecord {
    /// An empty record for `child`.
    pub fn new(child: ChildProfile) -> Self {
        Self {
            child,
            vaccines: Vec::new(),
        }
    }

    /// Per-status counts and the completion percentage. An empty record
    /// reports 0%.
    pub fn summary(&self) -> VaccinationSummary {
        let count = |status| self.vaccines.iter().filter(|v| v.status == status).count();
        let total = self.vaccines.len();
        let completed = count(VaccineStatus::Completed);
        let completion_percent = if total == 0 {
            0
        } else {
            // completed <= total, so the quotient is at most 100
            ((completed * 100 + total / 2) / total) as u8
        };

        VaccinationSummary {
            total,
            completed,
            due: count(VaccineStatus::Due),
            overdue: count(VaccineStatus::Overdue),
            upcoming: count(VaccineStatus::Upcoming),
            completion_percent,
        }
    }

    /// Vaccines in `status`, in record order.
    pub fn with_status(&self, status: VaccineStatus) -> Vec<&Vaccine> {
        self.vaccines.iter().filter(|v| v.status == status).collect()
    }

    /// Vaccines still to give, earliest due date first. Undated ones go last.
    pub fn pending(&self) -> Vec<&Vaccine> {
        let mut pending: Vec<&Vaccine> = self
            .vaccines
            .iter()
            .filter(|v| v.status != VaccineStatus::Completed)
            .collect();
        pending.sort_by(|a, b| {
            (a.due_date.is_none(), a.due_date, &a.id).cmp(&(b.due_date.is_none(), b.due_date, &b.id))
        });
        pending
    }

    /// Record a vaccine as given on `date`.
    pub fn mark_completed(&mut self, id: &str, date: NaiveDate) -> Result<(), CoreError> {
        let vaccine = self
            .vaccines
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| CoreError::UnknownVaccine(id.to_string()))?;
        vaccine.status = VaccineStatus::Completed;
        vaccine.completed_date = Some(date);
        Ok(())
    }
}

/// The demo record shown on a fresh dashboard.
pub fn sample_record() -> VaccinationRecord {
    let vaccine = |id: &str,
                   name: &str,
                   description: &str,
                   age_group: &str,
                   status: VaccineStatus,
                   date: Option<NaiveDate>,
                   importance: Importance| {
        let (due_date, completed_date) = if status == VaccineStatus::Completed {
            (None, date)
        } else {
            (date, None)
        };
        Vaccine {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            age_group: age_group.to_string(),
            status,
            due_date,
            completed_date,
            importance,
        }
    };

    VaccinationRecord {
        child: ChildProfile {
            id: "child1".to_string(),
            name: "Emma".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2022, 3, 15),
        },
        vaccines: vec![
            vaccine(
                "1",
                "MMR (Measles, Mumps, Rubella)",
                "Protects against measles, mumps, and rubella",
                "12-15 months",
                VaccineStatus::Completed,
                NaiveDate::from_ymd_opt(2023, 4, 10),
                Importance::Critical,
            ),
            vaccine(
                "2",
                "DTaP (Diphtheria, Tetanus, Pertussis)",
                "Fifth dose of DTaP vaccine",
                "4-6 years",
                VaccineStatus::Due,
                NaiveDate::from_ymd_opt(2024, 8, 25),
                Importance::Critical,
            ),
            vaccine(
                "3",
                "Varicella (Chickenpox)",
                "Second dose of chickenpox vaccine",
                "4-6 years",
                VaccineStatus::Upcoming,
                NaiveDate::from_ymd_opt(2024, 9, 15),
                Importance::Routine,
            ),
            vaccine(
                "4",
                "Hepatitis A",
                "Second dose of Hepatitis A vaccine",
                "18-24 months",
                VaccineStatus::Overdue,
                NaiveDate::from_ymd_opt(2024, 7, 20),
                Importance::Routine,
            ),
            vaccine(
                "5",
                "Influenza (Flu)",
                "Annual flu vaccination",
                "6 months+",
                VaccineStatus::Due,
                NaiveDate::from_ymd_opt(2024, 8, 30),
                Importance::Routine,
            ),
        ],
    }
}

// =============================================================================
// TESTS
// =============================================================================
