use crate::activator::ActivationFunction;
use crate::node::Node;

use std::sync::Arc;

/// Where a layer sits in the network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Input,
    Inner,
    Output,
}

/// An ordered set of nodes of a single network layer.
///
/// Membership is fixed once the layer is handed to a `Network`.
#[derive(Clone, Debug)]
pub struct Layer {
    kind: LayerKind,
    nodes: Vec<Node>,
}

impl Layer {
    /// Builds a layer from explicitly constructed nodes.
    ///
    /// The node roles are checked against the layer kind when the layer is
    /// handed to `Network::new`.
    pub fn new(kind: LayerKind, nodes: Vec<Node>) -> Self {
        Layer { kind, nodes }
    }

    /// Creates an input layer of `inputs` input nodes.
    pub fn input(inputs: usize) -> Self {
        Layer::new(LayerKind::Input, (0..inputs).map(|_| Node::input()).collect())
    }

    /// Creates an inner layer of `neurons` neurons sharing one activation
    /// function.
    pub fn inner<A>(neurons: usize, activation: A) -> Self
    where
        A: ActivationFunction + 'static,
    {
        Layer::new(LayerKind::Inner, neurons_of(neurons, Arc::new(activation)))
    }

    /// Creates an output layer of `neurons` neurons sharing one activation
    /// function.
    pub fn output<A>(neurons: usize, activation: A) -> Self
    where
        A: ActivationFunction + 'static,
    {
        Layer::new(LayerKind::Output, neurons_of(neurons, Arc::new(activation)))
    }

    /// Appends a bias node to the layer.
    pub fn with_bias(mut self) -> Self {
        self.nodes.push(Node::bias());
        self
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Returns a description of the first node whose role does not fit the
    /// layer kind.
    pub(crate) fn misplaced_node(&self) -> Option<String> {
        self.nodes
            .iter()
            .position(|node| {
                match self.kind {
                    LayerKind::Input => node.is_slave(),
                    LayerKind::Inner => node.is_input(),
                    LayerKind::Output => !node.is_slave(),
                }
            })
            .map(|i| format!("{:?} node {} in {:?} layer",
                             self.nodes[i].role(),
                             i,
                             self.kind))
    }
}

fn neurons_of(count: usize, activation: Arc<dyn ActivationFunction>) -> Vec<Node> {
    (0..count).map(|_| Node::neuron(activation.clone())).collect()
}
