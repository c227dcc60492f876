//! Page state for the prediction form
//!
//! The form values and the single result slot live in a [`ViewState`] owned
//! by whoever renders the page. Interactions are [`ViewEvent`]s folded in
//! with [`reduce`], which never mutates its input.

use crate::core::record::{ApplicantRecord, FieldValue};
use crate::models::PredictionResult;

/// Where the page is in the predict cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Computing,
    Displayed,
}

/// Contents of the single display slot
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplaySlot {
    #[default]
    Empty,
    Result(PredictionResult),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A form input changed
    FieldChanged(FieldValue),
    /// The predict button was pressed
    PredictRequested,
    PredictionReady(PredictionResult),
    PredictionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub record: ApplicantRecord,
    pub display: DisplaySlot,
    pub phase: Phase,
}

impl ViewState {
    /// Apply a batch of events in order
    pub fn apply<I>(self, events: I) -> Self
    where
        I: IntoIterator<Item = ViewEvent>,
    {
        events.into_iter().fold(self, reduce)
    }
}

/// Compute the next state for an event
///
/// idle -> computing -> displayed -> idle. A field change moves a displayed
/// page back to idle and drops the previous result. Results arriving outside
/// the computing phase are ignored.
pub fn reduce(state: ViewState, event: ViewEvent) -> ViewState {
    match (state.phase, event) {
        (Phase::Computing, ViewEvent::FieldChanged(_)) => state,
        (_, ViewEvent::FieldChanged(value)) => ViewState {
            record: state.record.with(value),
            display: DisplaySlot::Empty,
            phase: Phase::Idle,
        },
        (Phase::Computing, ViewEvent::PredictRequested) => state,
        (_, ViewEvent::PredictRequested) => ViewState {
            display: DisplaySlot::Empty,
            phase: Phase::Computing,
            ..state
        },
        (Phase::Computing, ViewEvent::PredictionReady(result)) => ViewState {
            display: DisplaySlot::Result(result),
            phase: Phase::Displayed,
            ..state
        },
        (Phase::Computing, ViewEvent::PredictionFailed(message)) => ViewState {
            display: DisplaySlot::Error(message),
            phase: Phase::Displayed,
            ..state
        },
        (_, ViewEvent::PredictionReady(_)) | (_, ViewEvent::PredictionFailed(_)) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let state = ViewState::default();
        assert_eq!(state.phase, Phase::Idle);

        let state = reduce(state, ViewEvent::PredictRequested);
        assert_eq!(state.phase, Phase::Computing);
        assert_eq!(state.display, DisplaySlot::Empty);

        let result = PredictionResult::from_raw(0.42);
        let state = reduce(state, ViewEvent::PredictionReady(result));
        assert_eq!(state.phase, Phase::Displayed);
        assert_eq!(state.display, DisplaySlot::Result(result));

        let state = reduce(state, ViewEvent::FieldChanged(FieldValue::Gre(310.0)));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.display, DisplaySlot::Empty);
        assert_eq!(state.record.gre(), 310);
    }

    #[test]
    fn test_second_prediction_overwrites_slot() {
        let first = PredictionResult::from_raw(0.1111);
        let second = PredictionResult::from_raw(0.2222);

        let state = ViewState::default().apply([
            ViewEvent::PredictRequested,
            ViewEvent::PredictionReady(first),
            ViewEvent::PredictRequested,
            ViewEvent::PredictionReady(second),
        ]);

        assert_eq!(state.display, DisplaySlot::Result(second));
        assert_eq!(state.phase, Phase::Displayed);
    }

    #[test]
    fn test_failure_is_displayed() {
        let state = ViewState::default().apply([
            ViewEvent::PredictRequested,
            ViewEvent::PredictionFailed("registry unavailable".to_string()),
        ]);

        assert_eq!(state.display, DisplaySlot::Error("registry unavailable".to_string()));
    }

    #[test]
    fn test_stray_result_ignored() {
        let state = reduce(
            ViewState::default(),
            ViewEvent::PredictionReady(PredictionResult::from_raw(0.9)),
        );
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn test_record_frozen_while_computing() {
        let computing = reduce(ViewState::default(), ViewEvent::PredictRequested);
        let after = reduce(computing.clone(), ViewEvent::FieldChanged(FieldValue::Gre(200.0)));
        assert_eq!(after, computing);
    }
}
