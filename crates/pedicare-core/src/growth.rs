//! # Growth Module
//!
//! BMI calculator for the nutrition and growth screen.
//!
//! The category thresholds are fixed placeholders. They are NOT the WHO/CDC
//! age- and sex-adjusted percentile curves: age and sex are required inputs
//! but do not move the thresholds. Replace [`BmiCategory::from_bmi`] only
//! together with a real percentile table.
//!
//! BMI is real-valued by definition, so this module is the one place in the
//! crate that opts out of the `float_arithmetic` denial.

#![allow(clippy::float_arithmetic)]

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// BMI below this is underweight.
pub const UNDERWEIGHT_BELOW: f64 = 15.0;
/// BMI from this value is overweight.
pub const OVERWEIGHT_FROM: f64 = 20.0;
/// BMI from this value is obesity.
pub const OBESITY_FROM: f64 = 23.0;

/// Shown under every result.
pub const DISCLAIMER: &str = "This calculator is an educational tool, not a substitute for \
professional medical advice. BMI in children is interpreted using age-and-gender-specific \
percentile charts. Always consult a pediatrician for an accurate assessment of your child's \
health and growth.";

// =============================================================================
// INPUT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(CoreError::unknown_option("sex", s)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

/// A single form field as submitted: either already numeric or raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for FormValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

/// The calculator form exactly as the user filled it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthForm {
    pub weight: Option<FormValue>,
    pub height: Option<FormValue>,
    pub age: Option<FormValue>,
    pub sex: Option<String>,
}

impl GrowthForm {
    /// A form with every field filled in from text.
    pub fn from_text(weight: &str, height: &str, age: &str, sex: &str) -> Self {
        Self {
            weight: Some(weight.into()),
            height: Some(height.into()),
            age: Some(age.into()),
            sex: Some(sex.to_string()),
        }
    }

    /// Check every field and produce a typed input.
    pub fn validate(&self) -> Result<GrowthInput, ValidationError> {
        let weight_kg = parse_measure(self.weight.as_ref(), GrowthField::Weight)?;
        let height_cm = parse_measure(self.height.as_ref(), GrowthField::Height)?;
        let age_years = parse_measure(self.age.as_ref(), GrowthField::Age)?;
        let sex = match self.sex.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(ValidationError::new(
                    GrowthField::Sex,
                    ValidationReason::Missing,
                ));
            }
            Some(text) => text.parse::<Sex>().map_err(|_| {
                ValidationError::new(GrowthField::Sex, ValidationReason::UnknownSex)
            })?,
        };

        check_bmi(weight_kg, height_cm)?;
        Ok(GrowthInput {
            weight_kg,
            height_cm,
            age_years,
            sex,
        })
    }
}

fn parse_measure(value: Option<&FormValue>, field: GrowthField) -> Result<f64, ValidationError> {
    let number = match value {
        None => return Err(ValidationError::new(field, ValidationReason::Missing)),
        Some(FormValue::Number(number)) => *number,
        Some(FormValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::new(field, ValidationReason::Missing));
            }
            text.parse::<f64>()
                .map_err(|_| ValidationError::new(field, ValidationReason::NotNumeric))?
        }
    };
    check_positive(number, field)
}

fn check_positive(number: f64, field: GrowthField) -> Result<f64, ValidationError> {
    if number.is_finite() && number > 0.0 {
        Ok(number)
    } else {
        Err(ValidationError::new(field, ValidationReason::NotPositive))
    }
}

/// Reject measurement pairs whose rounded BMI is not a finite number.
fn check_bmi(weight_kg: f64, height_cm: f64) -> Result<(), ValidationError> {
    if round_to_hundredths(body_mass_index(weight_kg, height_cm)).is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(
            GrowthField::Weight,
            ValidationReason::OutOfRange,
        ))
    }
}

/// Validated calculator input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    /// Intended domain is 2 to 20 years.
    pub age_years: f64,
    pub sex: Sex,
}

impl GrowthInput {
    /// Create an input from typed values, with the same checks as the form.
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_years: f64,
        sex: Sex,
    ) -> Result<Self, ValidationError> {
        let input = Self {
            weight_kg: check_positive(weight_kg, GrowthField::Weight)?,
            height_cm: check_positive(height_cm, GrowthField::Height)?,
            age_years: check_positive(age_years, GrowthField::Age)?,
            sex,
        };
        check_bmi(input.weight_kg, input.height_cm)?;
        Ok(input)
    }
}

// =============================================================================
// VALIDATION ERROR
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthField {
    Weight,
    Height,
    Age,
    Sex,
}

impl fmt::Display for GrowthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weight => "weight",
            Self::Height => "height",
            Self::Age => "age",
            Self::Sex => "sex",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationReason {
    Missing,
    NotNumeric,
    NotPositive,
    /// Weight and height are each valid but their BMI is not a finite number.
    OutOfRange,
    UnknownSex,
}

/// The calculator's only failure.
///
/// Whatever went wrong, the message shown to the user is the same.
/// `field` and `reason` are kept for callers that want to highlight the
/// offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please fill in all fields.")]
pub struct ValidationError {
    pub field: GrowthField,
    pub reason: ValidationReason,
}

impl ValidationError {
    fn new(field: GrowthField, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obesity,
}

impl BmiCategory {
    /// Bucket an (unrounded) BMI value.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            Self::Underweight
        } else if bmi < OVERWEIGHT_FROM {
            Self::Healthy
        } else if bmi < OBESITY_FROM {
            Self::Overweight
        } else {
            Self::Obesity
        }
    }

    /// Display label, e.g. "Healthy Weight".
    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Healthy => "Healthy Weight",
            Self::Overweight => "Overweight",
            Self::Obesity => "Obesity",
        }
    }

    /// Where a BMI in this bucket would sit on a growth chart.
    pub fn percentile_hint(self) -> &'static str {
        match self {
            Self::Underweight => "below the 5th percentile",
            Self::Healthy => "between the 5th and 85th percentile",
            Self::Overweight => "between the 85th and 95th percentile",
            Self::Obesity => "above the 95th percentile",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    /// Rounded to two decimal places.
    pub bmi: f64,
    pub category: BmiCategory,
    pub percentile_hint: String,
}

/// Body-mass index in kg/m², unrounded.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The growth classification component.
pub struct GrowthClassifier;

impl GrowthClassifier {
    /// Compute and bucket the BMI of a validated input.
    ///
    /// The category is decided on the unrounded value; only the reported
    /// BMI is rounded. Inputs built through [`GrowthInput::new`] or
    /// [`GrowthForm::validate`] always yield a finite BMI.
    pub fn classify(input: &GrowthInput) -> GrowthResult {
        let bmi = body_mass_index(input.weight_kg, input.height_cm);
        let category = BmiCategory::from_bmi(bmi);
        GrowthResult {
            bmi: round_to_hundredths(bmi),
            category,
            percentile_hint: category.percentile_hint().to_string(),
        }
    }

    /// Validate a raw form, then classify it.
    pub fn classify_form(form: &GrowthForm) -> Result<GrowthResult, ValidationError> {
        form.validate().map(|input| Self::classify(&input))
    }
}

// =============================================================================
// TESTS
// =============================================================================
