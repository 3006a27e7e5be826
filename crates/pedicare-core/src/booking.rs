//! # Booking Module
//!
//! Appointment request validation.
//!
//! A request names a doctor from the directory, a date and one of the fixed
//! time slots. Confirming it checks those three choices and nothing else:
//! there is no calendar, no capacity and no stored appointment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pediatrician who can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Doctor {
    /// Directory id, the value a request's `doctor_id` must carry.
    pub id: &'static str,
    /// Display name including title.
    pub name: &'static str,
    /// Field of practice as displayed.
    pub speciality: &'static str,
    /// Years in practice.
    pub experience_years: u8,
    /// Patient rating in tenths of a star (49 = 4.9).
    pub rating_tenths: u8,
    /// Next open slot as displayed. Informational only; booking does not
    /// check it.
    pub next_available: &'static str,
}

impl Doctor {
    /// Rating with one decimal, e.g. "4.9".
    pub fn rating_display(&self) -> String {
        format!("{}.{}", self.rating_tenths / 10, self.rating_tenths % 10)
    }
}

/// The bookable doctors, in display order.
pub const DOCTORS: [Doctor; 3] = [
    Doctor {
        id: "1",
        name: "Dr. Priya Sharma",
        speciality: "Pediatric Cardiology",
        experience_years: 15,
        rating_tenths: 49,
        next_available: "Today 2:30 PM",
    },
    Doctor {
        id: "2",
        name: "Dr. Rajesh Kumar",
        speciality: "General Pediatrics",
        experience_years: 12,
        rating_tenths: 48,
        next_available: "Today 4:00 PM",
    },
    Doctor {
        id: "3",
        name: "Dr. Anita Mehta",
        speciality: "Pediatric Neurology",
        experience_years: 18,
        rating_tenths: 49,
        next_available: "Tomorrow 10:00 AM",
    },
];

/// Every slot a request may name, as "hh:mm AM|PM". Any slot is offered on
/// any date.
pub const TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "02:00 PM",
    "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

/// Attached to every confirmed appointment.
pub const CONFIRMATION_NOTE: &str = "You will receive a confirmation SMS and email shortly.";

/// Look up a doctor by directory id. Ids are matched exactly.
pub fn find_doctor(id: &str) -> Option<&'static Doctor> {
    DOCTORS.iter().find(|d| d.id == id)
}

/// Why a request could not be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Doctor, date or slot is absent or blank.
    #[error("Please select a doctor, date, and time slot.")]
    MissingInformation,

    /// The doctor id is not in [`DOCTORS`].
    #[error("Unknown doctor: {0}")]
    UnknownDoctor(String),

    /// The slot is not one of [`TIME_SLOTS`].
    #[error("Unknown time slot: {0}")]
    UnknownSlot(String),
}

/// The booking form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentRequest {
    /// Id of a doctor in [`DOCTORS`].
    pub doctor_id: Option<String>,
    /// Requested day. Past dates are not rejected.
    pub date: Option<NaiveDate>,
    /// One of [`TIME_SLOTS`], matched exactly after trimming.
    pub time_slot: Option<String>,
}

/// A confirmed appointment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub doctor_id: String,
    /// Copied from the directory entry.
    pub doctor_name: String,
    /// Copied from the directory entry.
    pub speciality: String,
    pub date: NaiveDate,
    pub time_slot: String,
    /// Always [`CONFIRMATION_NOTE`].
    pub note: String,
}

impl AppointmentRequest {
    /// Check the three choices and produce the confirmation.
    ///
    /// Missing information is reported before an unknown doctor, and an
    /// unknown doctor before an unknown slot.
    pub fn confirm(&self) -> Result<Appointment, BookingError> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let (Some(doctor_id), Some(date), Some(time_slot)) =
            (non_blank(&self.doctor_id), self.date, non_blank(&self.time_slot))
        else {
            return Err(BookingError::MissingInformation);
        };

        let doctor =
            find_doctor(&doctor_id).ok_or_else(|| BookingError::UnknownDoctor(doctor_id.clone()))?;
        if !TIME_SLOTS.contains(&time_slot.as_str()) {
            return Err(BookingError::UnknownSlot(time_slot));
        }

        Ok(Appointment {
            doctor_id,
            doctor_name: doctor.name.to_string(),
            speciality: doctor.speciality.to_string(),
            date,
            time_slot,
            note: CONFIRMATION_NOTE.to_string(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
