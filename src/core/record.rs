use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::fields::{self, NumericField};

/// Errors raised when building a record from unchecked values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} has no option {value:?}")]
    InvalidChoice { field: &'static str, value: String },
}

/// University rating, an integer choice from 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UniversityRating(u8);

impl UniversityRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, InputError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InputError::OutOfRange {
                field: fields::UNIVERSITY_RATING.label,
                value: value as f64,
                min: Self::MIN as f64,
                max: Self::MAX as f64,
            })
        }
    }

    /// Nearest valid rating; NaN falls back to the default
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.round().clamp(Self::MIN as f64, Self::MAX as f64) as u8)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for UniversityRating {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Research experience, shown as "Yes"/"No" and encoded as 1/0 for the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Research {
    #[default]
    Yes,
    No,
}

impl Research {
    /// Model encoding of the answer
    #[inline]
    pub fn code(self) -> i64 {
        match self {
            Research::Yes => 1,
            Research::No => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Research::Yes => "Yes",
            Research::No => "No",
        }
    }
}

impl FromStr for Research {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Research::Yes),
            "No" => Ok(Research::No),
            other => Err(InputError::InvalidChoice {
                field: fields::RESEARCH_EXPERIENCE.label,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Research {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applicant gender, passed to the model unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    M,
    F,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::M),
            "F" => Ok(Gender::F),
            other => Err(InputError::InvalidChoice {
                field: fields::GENDER.label,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field change coming from the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Gre(f64),
    Toefl(f64),
    UniversityRating(f64),
    Sop(f64),
    Lor(f64),
    Cgpa(f64),
    Research(Research),
    Gender(Gender),
}

/// Applicant attributes fed to the predictor
///
/// Every value is within its field's range. The record has no setters:
/// [`ApplicantRecord::with`] returns a new record, so the one handed to a
/// prediction call cannot change underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplicantRecord {
    gre: u16,
    toefl: u16,
    university_rating: UniversityRating,
    sop: f64,
    lor: f64,
    cgpa: f64,
    research: Research,
    gender: Gender,
}

impl Default for ApplicantRecord {
    fn default() -> Self {
        Self {
            gre: fields::GRE_SCORE.default as u16,
            toefl: fields::TOEFL_SCORE.default as u16,
            university_rating: UniversityRating::default(),
            sop: fields::SOP_STRENGTH.default,
            lor: fields::LOR_STRENGTH.default,
            cgpa: fields::GPA.default,
            research: Research::default(),
            gender: Gender::default(),
        }
    }
}

impl ApplicantRecord {
    /// Build a record, rejecting any value outside its field's range
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gre: u16,
        toefl: u16,
        university_rating: u8,
        sop: f64,
        lor: f64,
        cgpa: f64,
        research: Research,
        gender: Gender,
    ) -> Result<Self, InputError> {
        Ok(Self {
            gre: check(&fields::GRE_SCORE, gre as f64)? as u16,
            toefl: check(&fields::TOEFL_SCORE, toefl as f64)? as u16,
            university_rating: UniversityRating::new(university_rating)?,
            sop: check(&fields::SOP_STRENGTH, sop)?,
            lor: check(&fields::LOR_STRENGTH, lor)?,
            cgpa: check(&fields::GPA, cgpa)?,
            research,
            gender,
        })
    }

    /// Return a copy with one field replaced, clamped to its constraints
    pub fn with(self, value: FieldValue) -> Self {
        let mut next = self;
        match value {
            FieldValue::Gre(v) => next.gre = fields::GRE_SCORE.clamp(v) as u16,
            FieldValue::Toefl(v) => next.toefl = fields::TOEFL_SCORE.clamp(v) as u16,
            FieldValue::UniversityRating(v) => {
                next.university_rating = UniversityRating::clamped(v)
            }
            FieldValue::Sop(v) => next.sop = fields::SOP_STRENGTH.clamp(v),
            FieldValue::Lor(v) => next.lor = fields::LOR_STRENGTH.clamp(v),
            FieldValue::Cgpa(v) => next.cgpa = fields::GPA.clamp(v),
            FieldValue::Research(v) => next.research = v,
            FieldValue::Gender(v) => next.gender = v,
        }
        next
    }

    pub fn gre(&self) -> u16 {
        self.gre
    }

    pub fn toefl(&self) -> u16 {
        self.toefl
    }

    pub fn university_rating(&self) -> UniversityRating {
        self.university_rating
    }

    pub fn sop(&self) -> f64 {
        self.sop
    }

    pub fn lor(&self) -> f64 {
        self.lor
    }

    pub fn cgpa(&self) -> f64 {
        self.cgpa
    }

    pub fn research(&self) -> Research {
        self.research
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }
}

fn check(field: &NumericField, value: f64) -> Result<f64, InputError> {
    if field.contains(value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange {
            field: field.label,
            value,
            min: field.min,
            max: field.max,
        })
    }
}
