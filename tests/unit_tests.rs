// Unit tests for the admission predictor

use admission_predictor::core::{
    fields::{GPA, GRE_SCORE, LOR_STRENGTH, SOP_STRENGTH, TOEFL_SCORE},
    reduce, ApplicantRecord, Cell, DisplaySlot, FieldValue, Gender, Phase, Research, TabularRow,
    ViewEvent, ViewState, FEATURE_COLUMNS,
};
use admission_predictor::models::{ApplicantForm, PredictionResult};
use admission_predictor::predictor::{Predictor, StubPredictor};

fn sample_record() -> ApplicantRecord {
    ApplicantRecord::new(300, 100, 1, 3.0, 3.0, 8.5, Research::Yes, Gender::M).unwrap()
}

#[test]
fn test_row_column_order() {
    let row = TabularRow::from(&sample_record());
    assert_eq!(
        row.columns(),
        &["GRE Score", "TOEFL Score", "University Rating", "SOP", "LOR", "CGPA", "Research", "Gender"]
    );
    assert_eq!(row.columns(), &FEATURE_COLUMNS);
}

#[test]
fn test_row_values_for_sample_applicant() {
    let row = TabularRow::from(&sample_record());
    assert_eq!(
        row.values(),
        &[
            Cell::Int(300),
            Cell::Int(100),
            Cell::Int(1),
            Cell::Float(3.0),
            Cell::Float(3.0),
            Cell::Float(8.5),
            Cell::Int(1),
            Cell::Text("M".to_string()),
        ]
    );
}

#[test]
fn test_row_passes_gender_through() {
    let record = sample_record().with(FieldValue::Gender(Gender::F));
    let row = TabularRow::from(&record);
    assert_eq!(row.get("Gender"), Some(&Cell::Text("F".to_string())));
}

#[test]
fn test_research_mapping() {
    assert_eq!("Yes".parse::<Research>().unwrap().code(), 1);
    assert_eq!("No".parse::<Research>().unwrap().code(), 0);
    assert!("yes".parse::<Research>().is_err());
    assert!("".parse::<Research>().is_err());
}

#[test]
fn test_rounding_of_model_output() {
    let result = PredictionResult::from_raw(0.8734567);
    assert_eq!(result.value(), 0.8735);
    assert_eq!(result.to_string(), "0.8735");
}

#[test]
fn test_stub_values_in_unit_interval() {
    let stub = StubPredictor::seeded(2024);
    let record = sample_record();

    for _ in 0..500 {
        let v = tokio_test::block_on(stub.predict(&record)).unwrap().value();
        assert!(v >= 0.0 && v < 1.0);
        let scaled = v * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6, "{} has more than 4 decimals", v);
    }
}

#[test]
fn test_numeric_fields_clamp_to_range() {
    for field in [GRE_SCORE, TOEFL_SCORE, SOP_STRENGTH, LOR_STRENGTH, GPA] {
        assert_eq!(field.clamp(field.min - 1.0), field.min, "{}", field.label);
        assert_eq!(field.clamp(field.max + 1.0), field.max, "{}", field.label);
        assert_eq!(field.clamp(f64::INFINITY), field.max, "{}", field.label);
        assert_eq!(field.clamp(f64::NEG_INFINITY), field.min, "{}", field.label);
    }
}

#[test]
fn test_form_submission_never_leaves_range() {
    let form = ApplicantForm {
        gre: 1000.0,
        toefl: 500.0,
        university_rating: 0.0,
        sop: -3.0,
        lor: 9.9,
        cgpa: 11.0,
        research: Research::No,
        gender: Gender::F,
    };

    let state = ViewState::default().apply(form.updates().map(ViewEvent::FieldChanged));
    let record = state.record;

    assert_eq!(record.gre(), 340);
    assert_eq!(record.toefl(), 120);
    assert_eq!(record.university_rating().get(), 1);
    assert_eq!(record.sop(), 0.0);
    assert_eq!(record.lor(), 5.0);
    assert_eq!(record.cgpa(), 10.0);
    assert_eq!(record.research(), Research::No);
}

#[test]
fn test_repeated_prediction_keeps_only_latest() {
    let stub = StubPredictor::seeded(99);
    let mut state = ViewState::default();
    let mut last = None;

    for _ in 0..2 {
        state = reduce(state, ViewEvent::PredictRequested);
        assert_eq!(state.display, DisplaySlot::Empty);
        let value = tokio_test::block_on(stub.predict(&state.record)).unwrap();
        state = reduce(state, ViewEvent::PredictionReady(value));
        last = Some(value);
    }

    assert_eq!(state.phase, Phase::Displayed);
    assert_eq!(state.display, DisplaySlot::Result(last.unwrap()));
}
