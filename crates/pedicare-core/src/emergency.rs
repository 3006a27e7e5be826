//! # Emergency Module
//!
//! Ambulance status timeline and the emergency-type catalog.
//!
//! After an emergency request the front-end shows a status line that moves
//! from "dispatched" to "en route" to "arriving" on fixed delays. This module
//! only describes that progression: which status holds at a given elapsed
//! time. Scheduling the updates belongs to the caller.
//!
//! Time is integer milliseconds since the request (logical time, not wall
//! clock).

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the ambulance is, as shown to the caller.
///
/// Variants are ordered by progression, so later statuses compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbulanceStatus {
    /// Request accepted, crew assigned.
    Dispatched,
    /// Driving towards the address.
    EnRoute,
    /// Close to the address.
    Arriving,
}

impl AmbulanceStatus {
    /// Fixed ETA shown for this status. Not derived from any location.
    pub fn eta_minutes(self) -> u32 {
        match self {
            Self::Dispatched => 12,
            Self::EnRoute => 8,
            Self::Arriving => 2,
        }
    }

    /// Status line shown to the caller, including the ETA.
    pub fn message(self) -> &'static str {
        match self {
            Self::Dispatched => "Ambulance dispatched - ETA 12 minutes",
            Self::EnRoute => "Ambulance en route - ETA 8 minutes",
            Self::Arriving => "Ambulance arriving soon - ETA 2 minutes",
        }
    }
}

impl fmt::Display for AmbulanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dispatched => "dispatched",
            Self::EnRoute => "en-route",
            Self::Arriving => "arriving",
        })
    }
}

/// A status and the time at which it takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStep {
    /// Milliseconds after the request at which `status` takes effect.
    pub offset_ms: u64,
    /// Holds until the next step's offset.
    pub status: AmbulanceStatus,
}

/// A step with its display texts, as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub offset_ms: u64,
    pub status: AmbulanceStatus,
    /// [`AmbulanceStatus::eta_minutes`] of `status`.
    pub eta_minutes: u32,
    /// [`AmbulanceStatus::message`] of `status`.
    pub message: String,
}

/// Ordered status steps. The first step starts at offset 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchTimeline {
    steps: Vec<DispatchStep>,
}

impl Default for DispatchTimeline {
    fn default() -> Self {
        Self {
            steps: vec![
                DispatchStep {
                    offset_ms: 0,
                    status: AmbulanceStatus::Dispatched,
                },
                DispatchStep {
                    offset_ms: 2_000,
                    status: AmbulanceStatus::EnRoute,
                },
                DispatchStep {
                    offset_ms: 8_000,
                    status: AmbulanceStatus::Arriving,
                },
            ],
        }
    }
}

impl DispatchTimeline {
    /// Build a timeline from explicit steps.
    ///
    /// Steps must be non-empty, start at offset 0 and have strictly
    /// increasing offsets.
    pub fn new(steps: Vec<DispatchStep>) -> Result<Self, CoreError> {
        match steps.first() {
            None => return Err(CoreError::InvalidTimeline("no steps")),
            Some(first) if first.offset_ms != 0 => {
                return Err(CoreError::InvalidTimeline("first step must start at 0"));
            }
            Some(_) => {}
        }
        if steps.windows(2).any(|w| w[0].offset_ms >= w[1].offset_ms) {
            return Err(CoreError::InvalidTimeline("offsets must strictly increase"));
        }
        Ok(Self { steps })
    }

    /// Steps in offset order.
    pub fn steps(&self) -> &[DispatchStep] {
        &self.steps
    }

    /// Status of the first step, in effect from offset 0.
    pub fn initial_status(&self) -> AmbulanceStatus {
        self.steps
            .first()
            .map(|s| s.status)
            .unwrap_or(AmbulanceStatus::Dispatched)
    }

    /// Status of the last step; it holds indefinitely.
    pub fn final_status(&self) -> AmbulanceStatus {
        self.steps
            .last()
            .map(|s| s.status)
            .unwrap_or(AmbulanceStatus::Dispatched)
    }

    /// Offset of the last step.
    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map(|s| s.offset_ms).unwrap_or(0)
    }

    /// The status in effect `elapsed_ms` after the request.
    pub fn status_at(&self, elapsed_ms: u64) -> AmbulanceStatus {
        self.steps
            .iter()
            .take_while(|s| s.offset_ms <= elapsed_ms)
            .last()
            .map(|s| s.status)
            .unwrap_or_else(|| self.initial_status())
    }

    /// Steps joined with their ETA and message, in offset order.
    pub fn entries(&self) -> Vec<TimelineEntry> {
        self.steps
            .iter()
            .map(|s| TimelineEntry {
                offset_ms: s.offset_ms,
                status: s.status,
                eta_minutes: s.status.eta_minutes(),
                message: s.status.message().to_string(),
            })
            .collect()
    }
}

// =============================================================================
// EMERGENCY TYPES
// =============================================================================

/// How the catalog ranks an emergency type. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencySeverity {
    High,
    Critical,
}

/// An entry of the emergency catalog shown before calling an ambulance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmergencyType {
    /// Short title, e.g. "Seizures".
    pub name: &'static str,
    /// One-line description of the signs.
    pub description: &'static str,
    pub severity: EmergencySeverity,
}

/// The emergency catalog, in display order.
pub const EMERGENCY_TYPES: [EmergencyType; 6] = [
    EmergencyType {
        name: "High Fever",
        description: "Temperature above 104°F (40°C)",
        severity: EmergencySeverity::High,
    },
    EmergencyType {
        name: "Difficulty Breathing",
        description: "Severe respiratory distress",
        severity: EmergencySeverity::Critical,
    },
    EmergencyType {
        name: "Severe Injury",
        description: "Cuts, burns, or trauma",
        severity: EmergencySeverity::High,
    },
    EmergencyType {
        name: "Allergic Reaction",
        description: "Severe allergic symptoms",
        severity: EmergencySeverity::Critical,
    },
    EmergencyType {
        name: "Seizures",
        description: "Convulsions or fits",
        severity: EmergencySeverity::Critical,
    },
    EmergencyType {
        name: "Poisoning",
        description: "Suspected ingestion of toxic substances",
        severity: EmergencySeverity::Critical,
    },
];

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeline_progression() {
        let timeline = DispatchTimeline::default();
        assert_eq!(timeline.status_at(0), AmbulanceStatus::Dispatched);
        assert_eq!(timeline.status_at(1_999), AmbulanceStatus::Dispatched);
        assert_eq!(timeline.status_at(2_000), AmbulanceStatus::EnRoute);
        assert_eq!(timeline.status_at(7_999), AmbulanceStatus::EnRoute);
        assert_eq!(timeline.status_at(8_000), AmbulanceStatus::Arriving);
        assert_eq!(timeline.status_at(u64::MAX), AmbulanceStatus::Arriving);
        assert_eq!(timeline.duration_ms(), 8_000);
    }

    #[test]
    fn messages_carry_eta() {
        assert_eq!(
            AmbulanceStatus::Dispatched.message(),
            "Ambulance dispatched - ETA 12 minutes"
        );
        assert_eq!(AmbulanceStatus::EnRoute.eta_minutes(), 8);
        assert_eq!(AmbulanceStatus::Arriving.eta_minutes(), 2);
    }

    #[test]
    fn entries_follow_steps() {
        let entries = DispatchTimeline::default().entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].offset_ms, 2_000);
        assert_eq!(entries[1].message, "Ambulance en route - ETA 8 minutes");
    }

    #[test]
    fn invalid_timelines_are_rejected() {
        assert!(DispatchTimeline::new(Vec::new()).is_err());

        let late_start = vec![DispatchStep {
            offset_ms: 5,
            status: AmbulanceStatus::Dispatched,
        }];
        assert!(DispatchTimeline::new(late_start).is_err());

        let unordered = vec![
            DispatchStep {
                offset_ms: 0,
                status: AmbulanceStatus::Dispatched,
            },
            DispatchStep {
                offset_ms: 0,
                status: AmbulanceStatus::Arriving,
            },
        ];
        assert!(matches!(
            DispatchTimeline::new(unordered),
            Err(CoreError::InvalidTimeline(_))
        ));
    }

    #[test]
    fn catalog_has_critical_entries() {
        let critical = EMERGENCY_TYPES
            .iter()
            .filter(|t| t.severity == EmergencySeverity::Critical)
            .count();
        assert_eq!(critical, 4);
    }
}
