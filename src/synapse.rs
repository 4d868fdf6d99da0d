//! Weighted edges between nodes.

use crate::node::NodeId;

/// A directed, weighted edge from a master node to a slave node.
///
/// The signal flows from the master to the slave: during propagation the
/// slave adds `weight * master value` to its sum.
#[derive(Clone, Debug, PartialEq)]
pub struct Synapse {
    master: NodeId,
    slave: NodeId,
    weight: f64,
}

impl Synapse {
    pub fn new(master: NodeId, slave: NodeId, weight: f64) -> Self {
        Synapse {
            master,
            slave,
            weight,
        }
    }

    /// Returns the upstream endpoint.
    pub fn master(&self) -> NodeId {
        self.master
    }

    /// Returns the downstream endpoint.
    pub fn slave(&self) -> NodeId {
        self.slave
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Adds `delta` to the weight.
    ///
    /// Once a synapse is registered in a network this is only reachable by
    /// the learning strategy, through the slave node that owns the synapse.
    pub fn change_weight(&mut self, delta: f64) {
        self.weight += delta;
    }
}

/// A master's reference to one of its outgoing synapses, stored on the
/// master node. `index` points into the slave's incoming synapse list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outgoing {
    pub slave: NodeId,
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_weight_is_additive() {
        let mut synapse = Synapse::new(NodeId::new(0, 0), NodeId::new(1, 0), 0.5);
        synapse.change_weight(0.25);
        synapse.change_weight(-1.0);
        assert_eq!(synapse.weight(), -0.25);
        assert_eq!(synapse.master(), NodeId::new(0, 0));
        assert_eq!(synapse.slave(), NodeId::new(1, 0));
    }
}
