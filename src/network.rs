//! A layered [feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network) stored as an
//! explicit graph of nodes and synapses.

use crate::error::{Error, Result};
use crate::layer::{Layer, LayerKind};
use crate::node::{Node, NodeId};
use crate::synapse::{Outgoing, Synapse};
use crate::utils::{Back, Front};

use rayon::prelude::*;

/// A feedforward network: an input layer, any number of inner layers and an
/// output layer, connected by synapses.
#[derive(Clone, Debug)]
pub struct Network {
    layers: Vec<Layer>,
    propagated: bool,
}

impl Network {
    /// Creates a network from `layers` in traversal order.
    ///
    /// The first layer must be the only input layer and the last layer the
    /// only output layer. Every layer in between must be an inner layer.
    /// Synapses are added afterwards with `add_synapse`.
    pub fn new(layers: Vec<Layer>) -> Result<Self> {
        if layers.len() < 2 {
            return Err(Error::InvalidTopology(
                format!("need at least 2 layers, got {}", layers.len())));
        }
        let last = layers.len() - 1;
        for (i, layer) in layers.iter().enumerate() {
            let expected = match i {
                0 => LayerKind::Input,
                i if i == last => LayerKind::Output,
                _ => LayerKind::Inner,
            };
            if layer.kind() != expected {
                return Err(Error::InvalidTopology(
                    format!("layer {} is {:?}, expected {:?}",
                            i,
                            layer.kind(),
                            expected)));
            }
            if let Some(node) = layer.misplaced_node() {
                return Err(Error::InvalidTopology(node));
            }
        }
        if layers.front().is_empty() || layers.back().is_empty() {
            return Err(Error::InvalidTopology(
                "input and output layers must not be empty".to_string()));
        }
        Ok(Network {
            layers,
            propagated: false,
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_layer(&self) -> &Layer {
        self.layers.front()
    }

    pub fn output_layer(&self) -> &Layer {
        self.layers.back()
    }

    /// Returns the number of values the network takes as input. Bias nodes
    /// are not counted.
    pub fn input_len(&self) -> usize {
        self.input_layer().nodes().iter().filter(|n| n.is_input()).count()
    }

    /// Returns the number of values the network outputs.
    pub fn output_len(&self) -> usize {
        self.output_layer().len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.layers.get(id.layer()).and_then(|l| l.nodes().get(id.index()))
    }

    /// Returns the ids of every node in layer `layer`.
    pub fn node_ids(&self, layer: usize) -> Vec<NodeId> {
        let len = self.layers.get(layer).map_or(0, |l| l.len());
        (0..len).map(|i| NodeId::new(layer, i)).collect()
    }

    /// Registers `synapse`.
    ///
    /// The slave must be a neuron in a layer strictly after the master's.
    pub fn add_synapse(&mut self, synapse: Synapse) -> Result<()> {
        let (master, slave) = (synapse.master(), synapse.slave());
        if self.node(master).is_none() {
            return Err(Error::InvalidEdge(
                format!("master {} is not part of this network", master)));
        }
        match self.node(slave) {
            None => {
                return Err(Error::InvalidEdge(
                    format!("slave {} is not part of this network", slave)))
            }
            Some(node) if !node.is_slave() => {
                return Err(Error::InvalidEdge(
                    format!("slave {} cannot receive synapses", slave)))
            }
            Some(_) => {}
        }
        if slave.layer() <= master.layer() {
            return Err(Error::InvalidEdge(
                format!("slave {} is not downstream of master {}", slave, master)));
        }

        trace!("synapse {} -> {} ({})", master, slave, synapse.weight());
        let index = self.node_mut(slave)
            .map(|node| node.connect_incoming(synapse))
            .ok_or_else(|| Error::InvalidEdge(format!("slave {} vanished", slave)))?;
        if let Some(node) = self.node_mut(master) {
            node.connect_outgoing(Outgoing { slave, index });
        }
        Ok(())
    }

    /// Enumerates every synapse: by slave layer, then slave node, then in
    /// registration order.
    pub fn synapses<'a>(&'a self) -> impl Iterator<Item = &'a Synapse> + 'a {
        self.layers
            .iter()
            .flat_map(|layer| layer.nodes())
            .flat_map(|node| node.incoming())
    }

    /// Returns every synapse weight, in `synapses()` order.
    pub fn weights(&self) -> Vec<f64> {
        self.synapses().map(|s| s.weight()).collect()
    }

    /// Assigns `values` to the input nodes in order.
    ///
    /// Nothing downstream is recomputed until `propagate` is called. On a
    /// shape mismatch no node is modified.
    pub fn input(&mut self, values: &[f64]) -> Result<()> {
        Error::check_shape(self.input_len(), values.len())?;
        let inputs = self.layers
            .mut_front()
            .nodes_mut()
            .iter_mut()
            .filter(|node| node.is_input());
        for (node, &value) in inputs.zip(values) {
            node.set_value(value);
        }
        self.propagated = false;
        Ok(())
    }

    /// Recomputes every node after the input layer.
    ///
    /// Layers are processed in order. The nodes of one layer are computed in
    /// parallel and the whole layer finishes before the next one starts, so
    /// no node ever reads a master from an unfinished layer.
    pub fn propagate(&mut self) {
        for l in 1..self.layers.len() {
            let (upstream, rest) = self.layers.split_at_mut(l);
            let upstream: &[Layer] = upstream;
            rest.mut_front()
                .nodes_mut()
                .par_iter_mut()
                .for_each(|node| node.compute(upstream));
        }
        self.propagated = true;
    }

    /// Returns the last computed values of the output layer.
    pub fn output(&self) -> Result<Vec<f64>> {
        if !self.propagated {
            return Err(Error::NotPropagated);
        }
        Ok(self.output_layer().nodes().iter().map(|n| n.value()).collect())
    }

    /// Feeds `values` through the network, returning the output layer.
    pub fn feed(&mut self, values: &[f64]) -> Result<Vec<f64>> {
        self.input(values)?;
        self.propagate();
        self.output()
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.layers.get_mut(id.layer()).and_then(|l| l.node_mut(id.index()))
    }
}
