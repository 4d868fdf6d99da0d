//! The smallest computation units of a network.

use crate::activator::ActivationFunction;
use crate::layer::Layer;
use crate::synapse::{Outgoing, Synapse};

use std::fmt;
use std::sync::Arc;

/// Identifies a node by its layer position and its position in that layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    layer: usize,
    index: usize,
}

impl NodeId {
    pub fn new(layer: usize, index: usize) -> Self {
        NodeId { layer, index }
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.layer, self.index)
    }
}

/// Accumulates the weighted inputs of one neuron.
///
/// The last sum is kept around because backpropagation evaluates the
/// activation derivative at it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Summator {
    last_sum: f64,
}

impl Summator {
    /// Sums `(weight, value)` pairs and remembers the result.
    pub fn sum<I>(&mut self, terms: I) -> f64
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.last_sum = terms.into_iter().map(|(w, x)| w * x).sum();
        self.last_sum
    }

    pub fn last_sum(&self) -> f64 {
        self.last_sum
    }
}

/// What a node does with its value.
#[derive(Clone)]
pub enum Role {
    /// Fed from outside the network.
    Input,
    /// Always outputs 1.0. Never a slave.
    Bias,
    /// Sums its incoming synapses and applies an activation function.
    Neuron {
        summator: Summator,
        activation: Arc<dyn ActivationFunction>,
    },
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Input => f.write_str("Input"),
            Role::Bias => f.write_str("Bias"),
            Role::Neuron { summator, activation } => f
                .debug_struct("Neuron")
                .field("summator", summator)
                .field("activation", activation)
                .finish(),
        }
    }
}

/// A single node of the network.
///
/// Synapses are stored on their slave. The master only keeps an `Outgoing`
/// reference, so both directions are reachable from any node.
#[derive(Clone, Debug)]
pub struct Node {
    role: Role,
    value: f64,
    incoming: Vec<Synapse>,
    outgoing: Vec<Outgoing>,
}

impl Node {
    fn with_role(role: Role, value: f64) -> Self {
        Node {
            role,
            value,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Creates a node fed from the network input.
    pub fn input() -> Self {
        Node::with_role(Role::Input, 0.0)
    }

    /// Creates a constant 1.0 node.
    pub fn bias() -> Self {
        Node::with_role(Role::Bias, 1.0)
    }

    /// Creates a neuron using the provided activation function.
    pub fn neuron(activation: Arc<dyn ActivationFunction>) -> Self {
        Node::with_role(Role::Neuron {
                            summator: Summator::default(),
                            activation,
                        },
                        0.0)
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_input(&self) -> bool {
        match self.role {
            Role::Input => true,
            _ => false,
        }
    }

    pub fn is_bias(&self) -> bool {
        match self.role {
            Role::Bias => true,
            _ => false,
        }
    }

    /// Returns true if the node may receive synapses.
    pub fn is_slave(&self) -> bool {
        match self.role {
            Role::Neuron { .. } => true,
            _ => false,
        }
    }

    /// Returns true if the node feeds at least one synapse.
    pub fn is_master(&self) -> bool {
        !self.outgoing.is_empty()
    }

    /// The last computed value. Only meaningful after a propagation that
    /// covered this node's layer.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The summator of a neuron, `None` for input and bias nodes.
    pub fn summator(&self) -> Option<&Summator> {
        match self.role {
            Role::Neuron { ref summator, .. } => Some(summator),
            _ => None,
        }
    }

    /// Evaluates the activation derivative at the last sum. `None` for
    /// nodes without an activation function.
    pub fn derivative(&self) -> Option<f64> {
        match self.role {
            Role::Neuron {
                ref summator,
                ref activation,
            } => Some(activation.derivative(summator.last_sum())),
            _ => None,
        }
    }

    /// Synapses for which this node is the slave.
    pub fn incoming(&self) -> &[Synapse] {
        &self.incoming
    }

    /// References to the synapses for which this node is the master.
    pub fn outgoing(&self) -> &[Outgoing] {
        &self.outgoing
    }

    pub(crate) fn incoming_mut(&mut self) -> &mut [Synapse] {
        &mut self.incoming
    }

    pub(crate) fn connect_incoming(&mut self, synapse: Synapse) -> usize {
        self.incoming.push(synapse);
        self.incoming.len() - 1
    }

    pub(crate) fn connect_outgoing(&mut self, outgoing: Outgoing) {
        self.outgoing.push(outgoing);
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Recomputes a neuron's value from its masters.
    ///
    /// `upstream` must hold every layer before this node's layer; masters
    /// always live there.
    pub(crate) fn compute(&mut self, upstream: &[Layer]) {
        let Node {
            ref mut role,
            ref mut value,
            ref incoming,
            ..
        } = *self;
        if let Role::Neuron {
            ref mut summator,
            ref activation,
        } = *role
        {
            let sum = summator.sum(incoming.iter().map(|synapse| {
                (synapse.weight(), master_value(upstream, synapse))
            }));
            *value = activation.evaluate(sum);
        }
    }
}

/// Reads the value of a synapse's master from the layers above its slave.
pub(crate) fn master_value(upstream: &[Layer], synapse: &Synapse) -> f64 {
    let master = synapse.master();
    upstream[master.layer()].nodes()[master.index()].value()
}
