use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::fields::{NumericField, GPA, LOR_STRENGTH, SOP_STRENGTH};
use crate::core::{ApplicantRecord, FieldValue, Gender, InputError, Research};

/// JSON request to predict admission for one applicant
///
/// Out-of-range values are rejected rather than clamped. In-range values
/// are snapped onto the field's step, as on the form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(max = 340))]
    #[serde(alias = "gre", rename = "greScore")]
    pub gre_score: u16,
    #[validate(range(max = 120))]
    #[serde(alias = "toefl", rename = "toeflScore")]
    pub toefl_score: u16,
    #[validate(range(min = 1, max = 5))]
    #[serde(alias = "university_rating", rename = "universityRating")]
    pub university_rating: u8,
    #[validate(range(min = 0.0, max = 5.0))]
    pub sop: f64,
    #[validate(range(min = 0.0, max = 5.0))]
    pub lor: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    #[serde(alias = "gpa")]
    pub cgpa: f64,
    pub research: Research,
    pub gender: Gender,
}

impl TryFrom<&PredictRequest> for ApplicantRecord {
    type Error = InputError;

    fn try_from(req: &PredictRequest) -> Result<Self, Self::Error> {
        ApplicantRecord::new(
            req.gre_score,
            req.toefl_score,
            req.university_rating,
            snap(&SOP_STRENGTH, req.sop),
            snap(&LOR_STRENGTH, req.lor),
            snap(&GPA, req.cgpa),
            req.research,
            req.gender,
        )
    }
}

/// Snap an in-range value onto the step grid; out-of-range values pass
/// through so the strict constructor reports them
fn snap(field: &NumericField, value: f64) -> f64 {
    if field.contains(value) {
        field.clamp(value)
    } else {
        value
    }
}

/// HTML form submission from the prediction page
///
/// Field names match the input `name` attributes on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantForm {
    pub gre: f64,
    pub toefl: f64,
    pub university_rating: f64,
    pub sop: f64,
    pub lor: f64,
    pub cgpa: f64,
    pub research: Research,
    pub gender: Gender,
}

impl ApplicantForm {
    /// The submission as one field change per input
    pub fn updates(&self) -> [FieldValue; 8] {
        [
            FieldValue::Gre(self.gre),
            FieldValue::Toefl(self.toefl),
            FieldValue::UniversityRating(self.university_rating),
            FieldValue::Sop(self.sop),
            FieldValue::Lor(self.lor),
            FieldValue::Cgpa(self.cgpa),
            FieldValue::Research(self.research),
            FieldValue::Gender(self.gender),
        ]
    }
}
