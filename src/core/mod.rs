// Core form and record exports
pub mod fields;
pub mod record;
pub mod row;
pub mod view;

pub use fields::{ChoiceField, FormField, NumericField, FORM_FIELDS};
pub use record::{ApplicantRecord, FieldValue, Gender, InputError, Research, UniversityRating};
pub use row::{Cell, TabularRow, FEATURE_COLUMNS};
pub use view::{reduce, DisplaySlot, Phase, ViewEvent, ViewState};
