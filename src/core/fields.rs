use serde::Serialize;

/// Constraints for a numeric form input
///
/// Mirrors what a number widget enforces: a closed range, a step measured
/// from `min`, a default value and the number of decimals shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericField {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub decimals: u32,
}

impl NumericField {
    /// Clamp a raw value into the field's range and snap it onto the step grid
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }

        let bounded = value.max(self.min).min(self.max);
        let steps = ((bounded - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).min(self.max);

        round_to(snapped, self.decimals)
    }

    /// Whether a value lies inside the closed range
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Constraints for a single-choice select input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChoiceField {
    pub key: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
    pub default_index: usize,
}

impl ChoiceField {
    pub fn default_option(&self) -> &'static str {
        self.options[self.default_index]
    }
}

pub const GRE_SCORE: NumericField = NumericField {
    key: "gre",
    label: "GRE Score",
    min: 0.0,
    max: 340.0,
    step: 1.0,
    default: 300.0,
    decimals: 0,
};

pub const TOEFL_SCORE: NumericField = NumericField {
    key: "toefl",
    label: "TOEFL Score",
    min: 0.0,
    max: 120.0,
    step: 1.0,
    default: 100.0,
    decimals: 0,
};

pub const UNIVERSITY_RATING: ChoiceField = ChoiceField {
    key: "university_rating",
    label: "University Rating",
    options: &["1", "2", "3", "4", "5"],
    default_index: 0,
};

pub const SOP_STRENGTH: NumericField = NumericField {
    key: "sop",
    label: "SOP Strength",
    min: 0.0,
    max: 5.0,
    step: 0.1,
    default: 3.0,
    decimals: 1,
};

pub const LOR_STRENGTH: NumericField = NumericField {
    key: "lor",
    label: "LOR Strength",
    min: 0.0,
    max: 5.0,
    step: 0.1,
    default: 3.0,
    decimals: 1,
};

pub const GPA: NumericField = NumericField {
    key: "cgpa",
    label: "GPA",
    min: 0.0,
    max: 10.0,
    step: 0.1,
    default: 8.5,
    decimals: 1,
};

pub const RESEARCH_EXPERIENCE: ChoiceField = ChoiceField {
    key: "research",
    label: "Research Experience",
    options: &["Yes", "No"],
    default_index: 0,
};

pub const GENDER: ChoiceField = ChoiceField {
    key: "gender",
    label: "Gender",
    options: &["M", "F"],
    default_index: 0,
};

/// A form field of either kind, in display order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormField {
    Number(NumericField),
    Select(ChoiceField),
}

/// All eight form fields in the order they are laid out on the page
pub const FORM_FIELDS: [FormField; 8] = [
    FormField::Number(GRE_SCORE),
    FormField::Number(TOEFL_SCORE),
    FormField::Select(UNIVERSITY_RATING),
    FormField::Number(SOP_STRENGTH),
    FormField::Number(LOR_STRENGTH),
    FormField::Number(GPA),
    FormField::Select(RESEARCH_EXPERIENCE),
    FormField::Select(GENDER),
];

/// Round to a fixed number of decimal places
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
