use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use super::{PredictError, Predictor};
use crate::core::ApplicantRecord;
use crate::models::PredictionResult;

/// Largest value a rounded stub prediction may take
const MAX_STUB_PREDICTION: f64 = 0.9999;

/// Placeholder predictor returning a uniform random value in [0, 1)
///
/// The applicant record is ignored. Useful for demos without a live model.
pub struct StubPredictor {
    rng: Mutex<StdRng>,
}

impl StubPredictor {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence of predictions
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn sample(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen::<f64>()
    }
}

impl Default for StubPredictor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Predictor for StubPredictor {
    fn strategy(&self) -> &'static str {
        "stub"
    }

    async fn predict(&self, _record: &ApplicantRecord) -> Result<PredictionResult, PredictError> {
        // Rounding can carry values above 0.99995 up to 1.0
        let value = PredictionResult::from_raw(self.sample()).value().min(MAX_STUB_PREDICTION);
        Ok(PredictionResult::from_raw(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, Gender};

    #[test]
    fn test_stub_range_and_precision() {
        let stub = StubPredictor::new();
        let record = ApplicantRecord::default();

        for _ in 0..1000 {
            let v = tokio_test::block_on(stub.predict(&record)).unwrap().value();
            assert!((0.0..1.0).contains(&v), "{} out of range", v);
            assert_eq!(v, (v * 10_000.0).round() / 10_000.0);
        }
    }

    #[test]
    fn test_seeded_stub_is_reproducible() {
        let record = ApplicantRecord::default();
        let a = StubPredictor::seeded(7);
        let b = StubPredictor::seeded(7);

        for _ in 0..10 {
            let va = tokio_test::block_on(a.predict(&record)).unwrap();
            let vb = tokio_test::block_on(b.predict(&record)).unwrap();
            assert_eq!(va, vb);
        }
    }

    #[test]
    fn test_stub_ignores_record() {
        let a = StubPredictor::seeded(42);
        let b = StubPredictor::seeded(42);
        let other = ApplicantRecord::default()
            .with(FieldValue::Gre(100.0))
            .with(FieldValue::Gender(Gender::F));

        let va = tokio_test::block_on(a.predict(&ApplicantRecord::default())).unwrap();
        let vb = tokio_test::block_on(b.predict(&other)).unwrap();
        assert_eq!(va, vb);
    }
}
