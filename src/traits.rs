//! Provide traits for different classes of algorithms
//!

use crate::dataset::Dataset;
use std::convert::From;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// a decision tree learns a set of decision rules which map attribute values to labels.
///
/// The fit method is implemented on the (checked) hyperparameters of an algorithm, which keeps
/// fitted models and their configuration apart.
pub trait Fit<A, L, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &Dataset<A, L>) -> Result<Self::Object, E>;
}

/// Predict with model into a mutable reference of targets.
pub trait PredictInplace<R, T> {
    /// Predict something in place
    fn predict_inplace(&self, x: &R, y: &mut T);

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}

impl<'a, R, T, O> Predict<&'a R, T> for O
where
    O: PredictInplace<R, T>,
{
    fn predict(&self, records: &'a R) -> T {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets);
        targets
    }
}
