//! Supervised learning algorithms driven by `Learning`.

mod backpropagation;

pub use self::backpropagation::Backpropagation;

use crate::error::Result;

/// Teaches a network one sample at a time.
///
/// The learning loop is generic over any network and sample type for which a
/// strategy exists.
pub trait LearningStrategy<N, S: ?Sized> {
    /// Runs one full learning step for `sample`, scaling every weight update
    /// by `theta`. Returns the mean squared error of the network's prediction
    /// for the sample before the update.
    fn learn_sample(&self, network: &mut N, sample: &S, theta: f64) -> Result<f64>;
}
