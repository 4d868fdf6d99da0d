extern crate env_logger;
extern crate neuronet;
extern crate rand;

use neuronet::*;

fn xor_samples() -> Vec<LearningSample> {
    vec![LearningSample::new(vec![0.0, 0.0], vec![0.0]),
         LearningSample::new(vec![0.0, 1.0], vec![1.0]),
         LearningSample::new(vec![1.0, 0.0], vec![1.0]),
         LearningSample::new(vec![1.0, 1.0], vec![0.0])]
}

fn score(network: &mut Network, samples: &[LearningSample]) -> Result<()> {
    for sample in samples {
        let output = network.feed(sample.input())?;
        println!("{:?} -> {:.4} (expected {})",
                 sample.input(),
                 output[0],
                 sample.expected()[0]);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut network = Network::new(vec![Layer::input(2).with_bias(),
                                        Layer::inner(3, Activator::Logistic(0.888)).with_bias(),
                                        Layer::output(1, Activator::Logistic(0.777))])?;
    generator::connect_layers(&mut network, &mut rand::thread_rng())?;

    let samples = xor_samples();
    let mut learning = Learning::new(network, Backpropagation)
        .initial_theta(0.33)
        .epochs(10_000)
        .theta_decay(ThetaDecay::Constant(0.9999))
        .shuffle_every_epoch(true)
        .logging(Logging::Epochs(1000));
    learning.learn(&samples)?;

    println!();
    score(learning.network_mut(), &samples)
}
