//! The epoch loop that drives a learning strategy over a sample set.

use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::strategy::LearningStrategy;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// The factor theta is multiplied by after each epoch.
#[derive(Clone, Serialize, Deserialize)]
pub enum ThetaDecay {
    /// The same factor after every epoch.
    Constant(f64),
    /// A factor computed from the 0-indexed epoch that just completed.
    #[serde(skip)]
    Schedule(Arc<dyn Fn(usize) -> f64 + Send + Sync>),
}

impl ThetaDecay {
    /// Wraps a closure mapping an epoch index to a decay factor.
    pub fn schedule<F>(f: F) -> Self
    where
        F: Fn(usize) -> f64 + Send + Sync + 'static,
    {
        ThetaDecay::Schedule(Arc::new(f))
    }

    /// Returns the factor to apply once `epoch` completes.
    pub fn factor(&self, epoch: usize) -> f64 {
        match *self {
            ThetaDecay::Constant(c) => c,
            ThetaDecay::Schedule(ref f) => f(epoch),
        }
    }
}

impl Default for ThetaDecay {
    fn default() -> Self {
        ThetaDecay::Constant(1.0)
    }
}

impl fmt::Debug for ThetaDecay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ThetaDecay::Constant(c) => write!(f, "Constant({})", c),
            ThetaDecay::Schedule(_) => f.write_str("Schedule(..)"),
        }
    }
}

/// Parameters of a learning run.
///
/// Deserializable from configuration; missing fields take their defaults:
///
/// * An initial theta of 0.1.
/// * 1000 epochs.
/// * No theta decay.
/// * No shuffling.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningSettings {
    /// The learning rate of the first epoch.
    pub initial_theta: f64,
    /// The number of passes over the sample set.
    pub epochs: usize,
    /// Applied to theta after every epoch.
    pub theta_decay: ThetaDecay,
    /// Learn the samples in a fresh random order every epoch.
    pub shuffle_every_epoch: bool,
}

impl Default for LearningSettings {
    fn default() -> Self {
        LearningSettings {
            initial_theta: 0.1,
            epochs: 1000,
            theta_decay: ThetaDecay::default(),
            shuffle_every_epoch: false,
        }
    }
}

/// Logging frequency to use during learning
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Logging {
    /// No logs will be emitted
    Silent,
    /// A summary will be emitted at completion
    Completion,
    /// A summary will be emitted after every `n` epochs
    Epochs(usize),
}

impl Logging {
    /// Performs logging after `epoch` (1-indexed) completes.
    fn epoch(&self, epoch: usize, training_error: f64, theta: f64) {
        if let Logging::Epochs(freq) = *self {
            if freq > 0 && epoch % freq == 0 {
                info!("Epoch {}:\tMSE={}\ttheta={}", epoch, training_error, theta);
            }
        }
    }

    /// Performs logging at the end of learning.
    fn completion(&self, report: &Report, start_time: Instant) {
        if let Logging::Silent = *self {
            return;
        }
        info!("Ran {} epochs in {:.3} seconds.",
              report.epochs,
              start_time.elapsed().as_secs_f64());
        info!("Final MSE: {}, final theta: {}", report.training_error, report.theta);
    }
}

/// The outcome of a completed learning run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Report {
    /// Epochs completed.
    pub epochs: usize,
    /// Theta after the last decay step, i.e. the theta a further epoch
    /// would use.
    pub theta: f64,
    /// Mean of the per-sample errors of the last epoch.
    pub training_error: f64,
}

/// Runs a `LearningStrategy` over a sample set for a fixed number of epochs.
///
/// The network is owned by the `Learning` for as long as it lives, so nothing
/// else can touch it while samples are being learned.
#[derive(Debug)]
pub struct Learning<N, St> {
    network: N,
    strategy: St,
    settings: LearningSettings,
    logging: Logging,
    rng: StdRng,
}

impl<N, St> Learning<N, St> {
    /// Creates a new Learning instance with the default `LearningSettings`,
    /// logging on completion.
    pub fn new(network: N, strategy: St) -> Self {
        Learning {
            network,
            strategy,
            settings: LearningSettings::default(),
            logging: Logging::Completion,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces all learning settings at once.
    pub fn settings(mut self, settings: LearningSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the learning rate of the first epoch.
    pub fn initial_theta(mut self, theta: f64) -> Self {
        self.settings.initial_theta = theta;
        self
    }

    /// Sets the number of epochs to run.
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.settings.epochs = epochs;
        self
    }

    /// Sets how theta decays between epochs.
    pub fn theta_decay(mut self, decay: ThetaDecay) -> Self {
        self.settings.theta_decay = decay;
        self
    }

    /// Sets whether samples are reshuffled every epoch.
    pub fn shuffle_every_epoch(mut self, shuffle: bool) -> Self {
        self.settings.shuffle_every_epoch = shuffle;
        self
    }

    /// Sets the type of logging to be emitted during learning.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Seeds the shuffling order, making shuffled runs reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn learning_settings(&self) -> &LearningSettings {
        &self.settings
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    pub fn into_network(self) -> N {
        self.network
    }

    /// Learns `samples` for the configured number of epochs.
    pub fn learn<S>(&mut self, samples: &[S]) -> Result<Report>
    where
        St: LearningStrategy<N, S>,
    {
        self.learn_until_cancelled(samples, &CancellationToken::new())
    }

    /// Learns `samples` for the configured number of epochs, stopping early
    /// with `Error::Cancelled` once `token` is cancelled.
    ///
    /// The token is checked before every sample. Weight updates of samples
    /// learned before the cancellation are kept.
    pub fn learn_until_cancelled<S>(&mut self,
                                    samples: &[S],
                                    token: &CancellationToken)
                                    -> Result<Report>
    where
        St: LearningStrategy<N, S>,
    {
        let start_time = Instant::now();
        let mut order: Vec<usize> = (0..samples.len()).collect();
        let mut theta = self.settings.initial_theta;
        let mut training_error = 0.0;

        for epoch in 0..self.settings.epochs {
            if self.settings.shuffle_every_epoch {
                order.shuffle(&mut self.rng);
            }

            training_error = 0.0;
            for (n, &i) in order.iter().enumerate() {
                if token.is_cancelled() {
                    debug!("Learning cancelled in epoch {} before sample {}.", epoch, n);
                    return Err(Error::Cancelled);
                }
                training_error += self.strategy.learn_sample(&mut self.network,
                                                             &samples[i],
                                                             theta)?;
            }
            if !samples.is_empty() {
                training_error /= samples.len() as f64;
            }

            self.logging.epoch(epoch + 1, training_error, theta);
            theta *= self.settings.theta_decay.factor(epoch);
        }

        let report = Report {
            epochs: self.settings.epochs,
            theta,
            training_error,
        };
        self.logging.completion(&report, start_time);
        Ok(report)
    }
}
