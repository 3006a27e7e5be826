//! # Triage Module
//!
//! Symptom triage for the child-friendly symptom checker.
//!
//! A completed questionnaire is mapped to one of three urgency levels by an
//! ordered decision table. Rules are evaluated top to bottom and the first
//! one that matches decides the result. There is no scoring: a response that
//! satisfies both the urgent and the moderate rule is urgent.
//!
//! | order | condition                                                        | level    |
//! |-------|------------------------------------------------------------------|----------|
//! | 1     | very high fever, OR extremely lethargic, OR severity >= 4        | urgent   |
//! | 2     | high fever, OR severity >= 3, OR "Difficulty breathing" reported | moderate |
//! | -     | otherwise                                                        | mild     |
//!
//! The symptom duration is collected by the questionnaire but takes no part
//! in the decision.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// QUESTIONNAIRE CONSTANTS
// =============================================================================

/// The only symptom label that takes part in the decision rules.
pub const DIFFICULTY_BREATHING: &str = "Difficulty breathing";

/// Checkbox labels offered by the symptom question.
pub const SYMPTOM_OPTIONS: [&str; 12] = [
    "Cough",
    "Runny nose",
    "Sore throat",
    "Headache",
    "Stomach pain",
    "Nausea/Vomiting",
    "Diarrhea",
    "Rash",
    DIFFICULTY_BREATHING,
    "Loss of appetite",
    "Fatigue",
    "Irritability",
];

/// General care tips shown alongside every triage result.
pub const CARE_TIPS: [&str; 5] = [
    "Ensure your child gets plenty of rest",
    "Keep them well-hydrated with water or clear fluids",
    "Monitor temperature regularly",
    "Contact your pediatrician if symptoms worsen",
    "Keep a symptom diary for medical appointments",
];

/// Parse `input` against a closed set of options, accepting either the
/// questionnaire label or the short key (case-insensitive).
fn parse_option<T: Copy>(
    kind: &'static str,
    input: &str,
    all: &[T],
    label: fn(T) -> &'static str,
    key: fn(T) -> &'static str,
) -> Result<T, CoreError> {
    let wanted = input.trim();
    all.iter()
        .copied()
        .find(|option| {
            label(*option).eq_ignore_ascii_case(wanted) || key(*option).eq_ignore_ascii_case(wanted)
        })
        .ok_or_else(|| CoreError::unknown_option(kind, input))
}

// =============================================================================
// ANSWER TYPES
// =============================================================================

/// Reported fever, in the bands the questionnaire offers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FeverLevel {
    #[default]
    None,
    /// 99-101°F
    Mild,
    /// 101-103°F
    High,
    /// Above 103°F
    VeryHigh,
}

impl FeverLevel {
    pub const ALL: [Self; 4] = [Self::None, Self::Mild, Self::High, Self::VeryHigh];

    /// The label shown by the questionnaire.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No fever",
            Self::Mild => "Mild fever (99-101°F)",
            Self::High => "High fever (101-103°F)",
            Self::VeryHigh => "Very high fever (103°F+)",
        }
    }

    /// Stable kebab-case key, accepted by `FromStr` and used in JSON.
    pub fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::High => "high",
            Self::VeryHigh => "very-high",
        }
    }
}

impl FromStr for FeverLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("fever", s, &Self::ALL, Self::label, Self::key)
    }
}

/// How long the symptoms have lasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymptomDuration {
    LessThanDay,
    OneToTwoDays,
    ThreeToFiveDays,
    OverWeek,
}

impl SymptomDuration {
    pub const ALL: [Self; 4] = [
        Self::LessThanDay,
        Self::OneToTwoDays,
        Self::ThreeToFiveDays,
        Self::OverWeek,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::LessThanDay => "Less than 24 hours",
            Self::OneToTwoDays => "1-2 days",
            Self::ThreeToFiveDays => "3-5 days",
            Self::OverWeek => "More than a week",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::LessThanDay => "less-than-day",
            Self::OneToTwoDays => "one-to-two-days",
            Self::ThreeToFiveDays => "three-to-five-days",
            Self::OverWeek => "over-week",
        }
    }
}

impl FromStr for SymptomDuration {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("duration", s, &Self::ALL, Self::label, Self::key)
    }
}

/// The child's behavior as observed by the parent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Behavior {
    #[default]
    Normal,
    SlightlyLessActive,
    VeryTired,
    ExtremelyLethargic,
}

impl Behavior {
    pub const ALL: [Self; 4] = [
        Self::Normal,
        Self::SlightlyLessActive,
        Self::VeryTired,
        Self::ExtremelyLethargic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal and playful",
            Self::SlightlyLessActive => "Slightly less active",
            Self::VeryTired => "Very tired and cranky",
            Self::ExtremelyLethargic => "Extremely lethargic",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::SlightlyLessActive => "slightly-less-active",
            Self::VeryTired => "very-tired",
            Self::ExtremelyLethargic => "extremely-lethargic",
        }
    }
}

impl FromStr for Behavior {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("behavior", s, &Self::ALL, Self::label, Self::key)
    }
}

/// Self-reported severity on a 1 (mild) to 5 (severe) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// Mild end of the scale.
    pub const MIN: u8 = 1;
    /// Severe end of the scale.
    pub const MAX: u8 = 5;

    /// Create a severity, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::SeverityOutOfRange(value))
        }
    }

    /// Read a raw scale answer without failing.
    ///
    /// Only the leading digits count, after trimming and an optional `+`:
    /// "4.0" reads as 4 and "5/5" as 5. No leading digits, or zero, reads as
    /// the lowest severity. Numbers above the scale are clamped to 5.
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        let digits = unsigned[..end].trim_start_matches('0');

        if digits.is_empty() {
            return Self::default();
        }
        // more than one significant digit is already above the scale
        match digits.parse::<u8>() {
            Ok(value) if digits.len() == 1 => Self(value.clamp(Self::MIN, Self::MAX)),
            _ => Self(Self::MAX),
        }
    }

    /// The scale value, always within 1..=5.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Severity {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SYMPTOM RESPONSE
// =============================================================================

/// A completed symptom questionnaire.
///
/// Every field has a benign default, so a partially filled response (or a
/// JSON document missing fields) classifies as if the missing answers were
/// the mildest option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymptomResponse {
    pub fever: FeverLevel,
    /// Checked symptom labels. Matching is exact.
    pub symptoms: BTreeSet<String>,
    pub duration: Option<SymptomDuration>,
    pub severity: Severity,
    pub behavior: Behavior,
}

impl SymptomResponse {
    /// Create an empty response (no fever, no symptoms, severity 1, normal).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fever answer.
    #[must_use]
    pub fn with_fever(mut self, fever: FeverLevel) -> Self {
        self.fever = fever;
        self
    }

    /// Add a checked symptom label.
    #[must_use]
    pub fn with_symptom(mut self, symptom: impl Into<String>) -> Self {
        self.symptoms.insert(symptom.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: SymptomDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Check whether a symptom label was reported.
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms.contains(symptom)
    }

    /// Build a response from raw questionnaire answers.
    ///
    /// Answers are keyed by question id: `temperature`, `symptoms`
    /// (comma-separated labels), `duration`, `severity`, `behavior`.
    /// Unknown keys are ignored and unparseable answers fall back to the
    /// benign default, so this never fails.
    pub fn from_answers(answers: &BTreeMap<String, String>) -> Self {
        let answer = |key: &str| answers.get(key).map(String::as_str);

        let symptoms = answer("symptoms")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            fever: answer("temperature")
                .and_then(|a| a.parse().ok())
                .unwrap_or_default(),
            symptoms,
            duration: answer("duration").and_then(|a| a.parse().ok()),
            severity: answer("severity")
                .map(Severity::parse_lenient)
                .unwrap_or_default(),
            behavior: answer("behavior")
                .and_then(|a| a.parse().ok())
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Coarse urgency classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageLevel {
    Urgent,
    Moderate,
    Mild,
}

impl TriageLevel {
    /// Headline recommendation for this level.
    pub fn recommended_action(self) -> &'static str {
        match self {
            Self::Urgent => "Seek Immediate Medical Attention",
            Self::Moderate => "Schedule Doctor Appointment",
            Self::Mild => "Monitor at Home",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Urgent => "Your child's symptoms require urgent medical evaluation.",
            Self::Moderate => "Your child should see a pediatrician within 24 hours.",
            Self::Mild => "Continue monitoring symptoms and provide comfort care.",
        }
    }

    /// Label of the call-to-action button.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Urgent => "Visit Emergency Room or Call Ambulance",
            Self::Moderate => "Book Appointment Today",
            Self::Mild => "Home Care Recommended",
        }
    }

    /// Where the call-to-action leads.
    pub fn care_flow(self) -> CareFlow {
        match self {
            Self::Urgent => CareFlow::Emergency,
            Self::Moderate => CareFlow::Booking,
            Self::Mild => CareFlow::HomeCare,
        }
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Urgent => "urgent",
            Self::Moderate => "moderate",
            Self::Mild => "mild",
        };
        f.write_str(name)
    }
}

/// Downstream flow a triage result directs the caller to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CareFlow {
    Emergency,
    Booking,
    HomeCare,
}

impl CareFlow {
    /// Route of the screen handling this flow. Home care stays put.
    pub fn route(self) -> Option<&'static str> {
        match self {
            Self::Emergency => Some("/emergency"),
            Self::Booking => Some("/appointments"),
            Self::HomeCare => None,
        }
    }
}

/// Outcome of a triage classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub level: TriageLevel,
    pub recommended_action: String,
    pub description: String,
    pub action_label: String,
    pub care_flow: CareFlow,
}

impl TriageResult {
    /// The fixed result attached to a level.
    pub fn for_level(level: TriageLevel) -> Self {
        Self {
            level,
            recommended_action: level.recommended_action().to_string(),
            description: level.description().to_string(),
            action_label: level.action_label().to_string(),
            care_flow: level.care_flow(),
        }
    }
}

// =============================================================================
// DECISION TABLE
// =============================================================================

struct TriageRule {
    level: TriageLevel,
    matches: fn(&SymptomResponse) -> bool,
}

/// Evaluated in order. Falling through every rule yields `Mild`.
const RULES: [TriageRule; 2] = [
    TriageRule {
        level: TriageLevel::Urgent,
        matches: needs_emergency_care,
    },
    TriageRule {
        level: TriageLevel::Moderate,
        matches: needs_appointment,
    },
];

fn needs_emergency_care(response: &SymptomResponse) -> bool {
    response.fever == FeverLevel::VeryHigh
        || response.behavior == Behavior::ExtremelyLethargic
        || response.severity.value() >= 4
}

fn needs_appointment(response: &SymptomResponse) -> bool {
    response.fever == FeverLevel::High
        || response.severity.value() >= 3
        || response.has_symptom(DIFFICULTY_BREATHING)
}

/// The triage decision component.
pub struct TriageEngine;

impl TriageEngine {
    /// Classify a questionnaire response.
    ///
    /// Total and side-effect free: the same response always yields the same
    /// result.
    pub fn classify(response: &SymptomResponse) -> TriageResult {
        TriageResult::for_level(Self::level(response))
    }

    /// The level alone, without the attached texts.
    pub fn level(response: &SymptomResponse) -> TriageLevel {
        RULES
            .iter()
            .find(|rule| (rule.matches)(response))
            .map(|rule| rule.level)
            .unwrap_or(TriageLevel::Mild)
    }
}

// =============================================================================
// TESTS
// =============================================================================
