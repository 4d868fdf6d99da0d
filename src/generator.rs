//! Helpers for wiring up freshly constructed networks.

use crate::error::{Error, Result};
use crate::network::Network;
use crate::synapse::Synapse;

use itertools::Itertools;
use rand::Rng;

/// Connects every node of layer `master` to every neuron of layer `slave`,
/// with weights drawn uniformly from `[-1, 1)`.
///
/// Returns the number of synapses added.
pub fn each_to_each<R>(network: &mut Network,
                       master: usize,
                       slave: usize,
                       rng: &mut R)
                       -> Result<usize>
where
    R: Rng,
{
    if master >= network.layers().len() || slave >= network.layers().len() {
        return Err(Error::InvalidEdge(
            format!("cannot connect layer {} to layer {} of a {} layer network",
                    master,
                    slave,
                    network.layers().len())));
    }
    let masters = network.node_ids(master);
    let slaves: Vec<_> = network.node_ids(slave)
        .into_iter()
        .filter(|&id| network.node(id).map_or(false, |n| n.is_slave()))
        .collect();

    let mut added = 0;
    for (m, s) in masters.into_iter().cartesian_product(slaves) {
        network.add_synapse(Synapse::new(m, s, rng.gen_range(-1.0..1.0)))?;
        added += 1;
    }
    Ok(added)
}

/// Fully connects every pair of adjacent layers with `each_to_each`.
pub fn connect_layers<R>(network: &mut Network, rng: &mut R) -> Result<usize>
where
    R: Rng,
{
    let mut added = 0;
    for l in 1..network.layers().len() {
        added += each_to_each(network, l - 1, l, rng)?;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activator::Activator;
    use crate::layer::Layer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn xor_shape() -> Network {
        Network::new(vec![Layer::input(2).with_bias(),
                          Layer::inner(3, Activator::Sigmoid).with_bias(),
                          Layer::output(1, Activator::Sigmoid)])
            .unwrap()
    }

    #[test]
    fn skips_bias_slaves() {
        let mut network = xor_shape();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(each_to_each(&mut network, 0, 1, &mut rng), Ok(9));
        assert_eq!(each_to_each(&mut network, 1, 2, &mut rng), Ok(4));
        for w in network.weights() {
            assert!(w >= -1.0 && w < 1.0);
        }
    }

    #[test]
    fn connects_all_layers() {
        let mut network = xor_shape();
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(connect_layers(&mut network, &mut rng), Ok(13));
        assert!(network.layers()[1].nodes()[3].is_master());
    }

    #[test]
    fn unknown_layer() {
        let mut network = xor_shape();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(each_to_each(&mut network, 1, 3, &mut rng).is_err());
    }

    #[test]
    fn backwards_connection() {
        let mut network = xor_shape();
        let mut rng = StdRng::seed_from_u64(4);
        assert!(each_to_each(&mut network, 2, 1, &mut rng).is_err());
    }
}
