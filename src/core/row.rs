use serde::Serialize;
use serde_json::{json, Value};

use crate::core::record::ApplicantRecord;

/// Column names the admission model was trained on, in order
pub const FEATURE_COLUMNS: [&str; 8] = [
    "GRE Score",
    "TOEFL Score",
    "University Rating",
    "SOP",
    "LOR",
    "CGPA",
    "Research",
    "Gender",
];

/// One cell of a tabular row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Single-row table handed to the model's predict call
#[derive(Debug, Clone, PartialEq)]
pub struct TabularRow {
    values: [Cell; 8],
}

impl TabularRow {
    pub fn columns(&self) -> &'static [&'static str; 8] {
        &FEATURE_COLUMNS
    }

    pub fn values(&self) -> &[Cell; 8] {
        &self.values
    }

    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&Cell> {
        FEATURE_COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| &self.values[i])
    }

    /// MLflow scoring payload in pandas `split` orientation
    pub fn to_dataframe_split(&self) -> Value {
        json!({
            "dataframe_split": {
                "columns": FEATURE_COLUMNS,
                "data": [self.values],
            }
        })
    }
}

impl From<&ApplicantRecord> for TabularRow {
    fn from(record: &ApplicantRecord) -> Self {
        Self {
            values: [
                Cell::Int(record.gre() as i64),
                Cell::Int(record.toefl() as i64),
                Cell::Int(record.university_rating().get() as i64),
                Cell::Float(record.sop()),
                Cell::Float(record.lor()),
                Cell::Float(record.cgpa()),
                Cell::Int(record.research().code()),
                Cell::Text(record.gender().as_str().to_string()),
            ],
        }
    }
}
