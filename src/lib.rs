//! A small feedforward neural network engine with pluggable supervised
//! learning.
//!
//! Networks are explicit graphs: layers of nodes connected by weighted
//! synapses. Signals are propagated layer by layer, and a
//! `LearningStrategy` such as `Backpropagation` adjusts the weights one
//! sample at a time, driven by the epoch loop in `Learning`.
//!
//! # Example
//!
//! Let's set up a network for the XOR function:
//!
//! ```
//! # use neuronet::*;
//! # use rand::SeedableRng;
//! // 2 inputs and a bias, 3 inner neurons and a bias, 1 output.
//! let mut network = Network::new(vec![
//!     Layer::input(2).with_bias(),
//!     Layer::inner(3, Activator::Sigmoid).with_bias(),
//!     Layer::output(1, Activator::Sigmoid),
//! ]).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! generator::connect_layers(&mut network, &mut rng).unwrap();
//!
//! let examples = [([0.0, 0.0], [0.0]),
//!                 ([0.0, 1.0], [1.0]),
//!                 ([1.0, 0.0], [1.0]),
//!                 ([1.0, 1.0], [0.0])];
//!
//! let mut learning = Learning::new(network, Backpropagation)
//!     .initial_theta(0.33)
//!     .epochs(100)
//!     .theta_decay(ThetaDecay::Constant(0.9999))
//!     .shuffle_every_epoch(true)
//!     .logging(Logging::Silent);
//! let report = learning.learn(&examples[..]).unwrap();
//! assert_eq!(report.epochs, 100);
//!
//! let mut network = learning.into_network();
//! assert_eq!(network.feed(&[1.0, 0.0]).unwrap().len(), 1);
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod activator;
pub mod cancel;
pub mod error;
pub mod generator;
pub mod layer;
pub mod learning;
pub mod network;
pub mod node;
pub mod sample;
pub mod strategy;
pub mod synapse;

mod utils;

pub use crate::activator::{ActivationFunction, Activator};
pub use crate::cancel::CancellationToken;
pub use crate::error::{Error, Result};
pub use crate::layer::{Layer, LayerKind};
pub use crate::learning::{Learning, LearningSettings, Logging, Report, ThetaDecay};
pub use crate::network::Network;
pub use crate::node::{Node, NodeId, Summator};
pub use crate::sample::{LearningSample, Sample, SupervisedSample};
pub use crate::strategy::{Backpropagation, LearningStrategy};
pub use crate::synapse::Synapse;
