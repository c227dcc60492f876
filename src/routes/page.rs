//! Server-rendered prediction page

use std::fmt::Write;

use crate::core::fields::{self, ChoiceField, FormField, NumericField, FORM_FIELDS};
use crate::core::{ApplicantRecord, DisplaySlot, ViewState};

const TITLE: &str = "Graduate Admission Prediction";

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
.grid{display:grid;grid-template-columns:repeat(4,1fr);gap:1rem}\
label{display:flex;flex-direction:column;font-size:.9rem;gap:.25rem}\
.actions{display:flex;align-items:center;gap:2rem;margin-top:1.5rem}\
.prediction{font-size:1.5rem;font-variant-numeric:tabular-nums}\
.error{color:#b00020}";

/// Render the whole page for a view state
pub fn render(state: &ViewState) -> String {
    let mut inputs = String::new();
    for field in FORM_FIELDS {
        match field {
            FormField::Number(n) => render_number(&mut inputs, &n, number_value(&state.record, &n)),
            FormField::Select(c) => render_select(&mut inputs, &c, selected_value(&state.record, &c)),
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n\
<form method=\"post\" action=\"/predict\">\n<div class=\"grid\">\n{inputs}</div>\n\
<div class=\"actions\">\n<button type=\"submit\">Predict</button>\n{display}\n</div>\n\
</form>\n</body>\n</html>\n",
        title = TITLE,
        style = STYLE,
        inputs = inputs,
        display = render_display(&state.display),
    )
}

fn render_number(out: &mut String, field: &NumericField, value: f64) {
    let _ = writeln!(
        out,
        "<label>{label}<input type=\"number\" name=\"{key}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value:.prec$}\" required></label>",
        label = field.label,
        key = field.key,
        min = field.min,
        max = field.max,
        step = field.step,
        value = value,
        prec = field.decimals as usize,
    );
}

fn render_select(out: &mut String, field: &ChoiceField, selected: &str) {
    let _ = write!(out, "<label>{}<select name=\"{}\">", field.label, field.key);
    for option in field.options {
        let marker = if *option == selected { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{0}\"{1}>{0}</option>", option, marker);
    }
    let _ = writeln!(out, "</select></label>");
}

fn render_display(slot: &DisplaySlot) -> String {
    match slot {
        DisplaySlot::Empty => "<output class=\"prediction\" id=\"prediction\"></output>".to_string(),
        DisplaySlot::Result(result) => {
            format!("<output class=\"prediction\" id=\"prediction\">{}</output>", result)
        }
        DisplaySlot::Error(message) => format!(
            "<output class=\"prediction error\" id=\"prediction\" role=\"alert\">{}</output>",
            escape_html(message)
        ),
    }
}

fn number_value(record: &ApplicantRecord, field: &NumericField) -> f64 {
    match field.key {
        k if k == fields::GRE_SCORE.key => record.gre() as f64,
        k if k == fields::TOEFL_SCORE.key => record.toefl() as f64,
        k if k == fields::SOP_STRENGTH.key => record.sop(),
        k if k == fields::LOR_STRENGTH.key => record.lor(),
        k if k == fields::GPA.key => record.cgpa(),
        _ => field.default,
    }
}

fn selected_value(record: &ApplicantRecord, field: &ChoiceField) -> &'static str {
    match field.key {
        k if k == fields::UNIVERSITY_RATING.key => {
            let index = record.university_rating().get() as usize - 1;
            field.options.get(index).copied().unwrap_or(field.default_option())
        }
        k if k == fields::RESEARCH_EXPERIENCE.key => record.research().as_str(),
        k if k == fields::GENDER.key => record.gender().as_str(),
        _ => field.default_option(),
    }
}

/// Escape text for an HTML text node
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, Research};
    use crate::models::PredictionResult;

    #[test]
    fn test_default_page_inputs() {
        let html = render(&ViewState::default());
        assert!(html.contains("name=\"gre\" min=\"0\" max=\"340\" step=\"1\" value=\"300\""));
        assert!(html.contains("name=\"cgpa\" min=\"0\" max=\"10\" step=\"0.1\" value=\"8.5\""));
        assert!(html.contains("<option value=\"Yes\" selected>Yes</option>"));
        assert!(html.contains("<option value=\"1\" selected>1</option>"));
    }

    #[test]
    fn test_page_reflects_record() {
        let state = ViewState {
            record: ApplicantRecord::default()
                .with(FieldValue::UniversityRating(4.0))
                .with(FieldValue::Research(Research::No)),
            ..ViewState::default()
        };
        let html = render(&state);
        assert!(html.contains("<option value=\"4\" selected>4</option>"));
        assert!(html.contains("<option value=\"No\" selected>No</option>"));
    }

    #[test]
    fn test_page_shows_result() {
        let state = ViewState {
            display: DisplaySlot::Result(PredictionResult::from_raw(0.8734567)),
            ..ViewState::default()
        };
        assert!(render(&state).contains(">0.8735</output>"));
    }

    #[test]
    fn test_error_message_escaped() {
        let state = ViewState {
            display: DisplaySlot::Error("<script>".to_string()),
            ..ViewState::default()
        };
        let html = render(&state);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
