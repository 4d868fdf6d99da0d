//! Online gradient descent by [backpropagation]
//! (https://en.wikipedia.org/wiki/Backpropagation).

use crate::error::{Error, Result};
use crate::layer::Layer;
use crate::network::Network;
use crate::node::{master_value, Node, NodeId};
use crate::sample::SupervisedSample;
use crate::strategy::LearningStrategy;
use crate::utils::mean_square_error;

use rayon::prelude::*;

/// Plain gradient-descent backpropagation without momentum or
/// regularization.
///
/// Every sample is learned in a single backward pass: the output layer first,
/// then each inner layer towards the input. A layer's weights are updated as
/// soon as its sigmas are known, so upstream sigmas are computed from the
/// already updated downstream weights.
#[derive(Copy, Clone, Debug, Default)]
pub struct Backpropagation;

impl<S> LearningStrategy<Network, S> for Backpropagation
where
    S: SupervisedSample + ?Sized,
{
    fn learn_sample(&self, network: &mut Network, sample: &S, theta: f64) -> Result<f64> {
        let expected = sample.expected();
        Error::check_shape(network.output_len(), expected.len())?;
        let output = network.feed(sample.input())?;
        let error = mean_square_error(&output, expected);

        let mut sigmas = SigmaTable::new(network.layers());
        let layers = network.layers_mut();
        let last = layers.len() - 1;
        sigmas.publish(output_layer_pass(layers, expected, &output, theta));
        for l in (1..last).rev() {
            let records = inner_layer_pass(layers, l, &sigmas, theta);
            sigmas.publish(records);
        }
        Ok(error)
    }
}

/// The error signal of one neuron for the sample being learned.
#[derive(Copy, Clone, Debug, PartialEq)]
struct NeuronSigma {
    node: NodeId,
    sigma: f64,
}

/// Sigmas of the layers already processed in the current backward pass.
///
/// Nodes that never received a sigma read as zero; they can't be slaves, so
/// nothing ever multiplies them in.
struct SigmaTable {
    sigmas: Vec<Vec<f64>>,
}

impl SigmaTable {
    fn new(layers: &[Layer]) -> Self {
        SigmaTable { sigmas: layers.iter().map(|l| vec![0.0; l.len()]).collect() }
    }

    fn get(&self, node: NodeId) -> f64 {
        self.sigmas[node.layer()][node.index()]
    }

    fn publish(&mut self, records: Vec<NeuronSigma>) {
        for record in records {
            self.sigmas[record.node.layer()][record.node.index()] = record.sigma;
        }
    }
}

/// Computes `sigma_i = f'(sum_i) * (expected_i - output_i)` for every output
/// neuron and updates their incoming weights.
fn output_layer_pass(layers: &mut [Layer],
                     expected: &[f64],
                     output: &[f64],
                     theta: f64)
                     -> Vec<NeuronSigma> {
    let l = layers.len() - 1;
    let (upstream, rest) = layers.split_at_mut(l);
    let upstream: &[Layer] = upstream;
    rest[0]
        .nodes_mut()
        .par_iter_mut()
        .zip(expected.par_iter())
        .zip(output.par_iter())
        .enumerate()
        .filter_map(|(i, ((node, &e), &o))| {
            let sigma = node.derivative()? * (e - o);
            adjust_weights(node, upstream, theta, sigma);
            Some(NeuronSigma {
                node: NodeId::new(l, i),
                sigma,
            })
        })
        .collect()
}

/// Computes the sigmas of inner layer `l` from the sigmas of its slaves and
/// updates the layer's incoming weights.
///
/// Every layer after `l` must already be published in `sigmas`.
fn inner_layer_pass(layers: &mut [Layer],
                    l: usize,
                    sigmas: &SigmaTable,
                    theta: f64)
                    -> Vec<NeuronSigma> {
    let (upstream, rest) = layers.split_at_mut(l);
    let (current, downstream) = match rest.split_first_mut() {
        Some(split) => split,
        None => return Vec::new(),
    };
    let upstream: &[Layer] = upstream;
    let downstream: &[Layer] = downstream;
    current
        .nodes_mut()
        .par_iter_mut()
        .enumerate()
        .filter_map(|(i, node)| {
            let sigma = node.derivative()? * child_sigma(node, l, downstream, sigmas);
            adjust_weights(node, upstream, theta, sigma);
            Some(NeuronSigma {
                node: NodeId::new(l, i),
                sigma,
            })
        })
        .collect()
}

/// Sums `weight * sigma(slave)` over the outgoing synapses of `node`, which
/// lives in layer `l`.
fn child_sigma(node: &Node, l: usize, downstream: &[Layer], sigmas: &SigmaTable) -> f64 {
    node.outgoing()
        .iter()
        .map(|out| {
            let slave = &downstream[out.slave.layer() - l - 1].nodes()[out.slave.index()];
            slave.incoming()[out.index].weight() * sigmas.get(out.slave)
        })
        .sum()
}

/// Applies `weight += theta * sigma * master value` to every incoming
/// synapse of `node`.
///
/// A synapse is only ever reached through its slave, so the parallel writes
/// never overlap.
fn adjust_weights(node: &mut Node, upstream: &[Layer], theta: f64, sigma: f64) {
    node.incoming_mut().par_iter_mut().for_each(|synapse| {
        let delta = theta * sigma * master_value(upstream, synapse);
        synapse.change_weight(delta);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activator::{ActivationFunction, Activator};
    use crate::layer::Layer;
    use crate::sample::LearningSample;
    use crate::synapse::Synapse;
    use approx::assert_abs_diff_eq;

    fn id(layer: usize, index: usize) -> NodeId {
        NodeId::new(layer, index)
    }

    /// input -> inner(2) -> output, sigmoid everywhere.
    fn two_layer_network() -> Network {
        let mut network = Network::new(vec![Layer::input(1),
                                            Layer::inner(2, Activator::Sigmoid),
                                            Layer::output(1, Activator::Sigmoid)])
            .unwrap();
        network.add_synapse(Synapse::new(id(0, 0), id(1, 0), 0.4)).unwrap();
        network.add_synapse(Synapse::new(id(0, 0), id(1, 1), -0.6)).unwrap();
        network.add_synapse(Synapse::new(id(1, 0), id(2, 0), 0.3)).unwrap();
        network.add_synapse(Synapse::new(id(1, 1), id(2, 0), 0.9)).unwrap();
        network
    }

    #[test]
    fn weight_update_sign() {
        let mut network = Network::new(vec![Layer::input(1),
                                            Layer::output(1, Activator::Sigmoid)])
            .unwrap();
        network.add_synapse(Synapse::new(id(0, 0), id(1, 0), 0.1)).unwrap();
        let sample = LearningSample::new(vec![0.5], vec![1.0]);

        Backpropagation.learn_sample(&mut network, &sample, 0.5).unwrap();

        assert!(network.weights()[0] > 0.1);
    }

    #[test]
    fn output_layer_update() {
        let mut network = Network::new(vec![Layer::input(1),
                                            Layer::output(1, Activator::Sigmoid)])
            .unwrap();
        network.add_synapse(Synapse::new(id(0, 0), id(1, 0), 0.2)).unwrap();
        let sample = ([2.0], [0.0]);

        let error = Backpropagation.learn_sample(&mut network, &sample, 0.1).unwrap();

        let out = Activator::Sigmoid.evaluate(0.4);
        let sigma = Activator::Sigmoid.derivative(0.4) * (0.0 - out);
        assert_abs_diff_eq!(error, out * out);
        assert_abs_diff_eq!(network.weights()[0], 0.2 + 0.1 * sigma * 2.0, epsilon = 1e-15);
    }

    #[test]
    fn inner_layer_uses_updated_downstream_weights() {
        let mut network = two_layer_network();
        let theta = 0.5;
        let f = Activator::Sigmoid;

        // Forward pass by hand.
        let x = 1.0;
        let (s0, s1) = (0.4 * x, -0.6 * x);
        let (h0, h1) = (f.evaluate(s0), f.evaluate(s1));
        let so = 0.3 * h0 + 0.9 * h1;
        let out = f.evaluate(so);

        let sigma_out = f.derivative(so) * (1.0 - out);
        let w0 = 0.3 + theta * sigma_out * h0;
        let w1 = 0.9 + theta * sigma_out * h1;
        let sigma_h0 = f.derivative(s0) * w0 * sigma_out;
        let sigma_h1 = f.derivative(s1) * w1 * sigma_out;

        Backpropagation.learn_sample(&mut network, &([x], [1.0]), theta).unwrap();

        // Weights are enumerated by slave: inner synapses first.
        let weights = network.weights();
        assert_abs_diff_eq!(weights[0], 0.4 + theta * sigma_h0 * x, epsilon = 1e-15);
        assert_abs_diff_eq!(weights[1], -0.6 + theta * sigma_h1 * x, epsilon = 1e-15);
        assert_abs_diff_eq!(weights[2], w0, epsilon = 1e-15);
        assert_abs_diff_eq!(weights[3], w1, epsilon = 1e-15);
    }

    #[test]
    fn bias_nodes_are_skipped() {
        let mut network = Network::new(vec![Layer::input(1).with_bias(),
                                            Layer::inner(1, Activator::TanH).with_bias(),
                                            Layer::output(1, Activator::Sigmoid)])
            .unwrap();
        network.add_synapse(Synapse::new(id(0, 0), id(1, 0), 0.5)).unwrap();
        network.add_synapse(Synapse::new(id(0, 1), id(1, 0), 0.5)).unwrap();
        network.add_synapse(Synapse::new(id(1, 0), id(2, 0), 0.5)).unwrap();
        network.add_synapse(Synapse::new(id(1, 1), id(2, 0), 0.5)).unwrap();
        let before = network.weights();

        Backpropagation.learn_sample(&mut network, &([1.0], [0.0]), 0.3).unwrap();

        let after = network.weights();
        assert_eq!(after.len(), 4);
        for (b, a) in before.iter().zip(&after) {
            assert!(a < b);
        }
    }

    #[test]
    fn wrong_expected_size() {
        let mut network = two_layer_network();
        let before = network.weights();
        let result = Backpropagation.learn_sample(&mut network, &([1.0], [1.0, 0.0]), 0.5);
        assert_eq!(result, Err(Error::ShapeMismatch { expected: 1, actual: 2 }));
        assert_eq!(network.weights(), before);
    }

    #[test]
    fn wrong_input_size() {
        let mut network = two_layer_network();
        let before = network.weights();
        let result = Backpropagation.learn_sample(&mut network, &([1.0, 2.0], [1.0]), 0.5);
        assert_eq!(result, Err(Error::ShapeMismatch { expected: 1, actual: 2 }));
        assert_eq!(network.weights(), before);
    }

    #[test]
    fn sigma_table_defaults_to_zero() {
        let layers = vec![Layer::input(2), Layer::output(1, Activator::Sigmoid)];
        let mut table = SigmaTable::new(&layers);
        assert_eq!(table.get(id(0, 1)), 0.0);
        table.publish(vec![NeuronSigma { node: id(1, 0), sigma: 0.25 }]);
        assert_eq!(table.get(id(1, 0)), 0.25);
    }
}
