//! Data consumed by the learning loop.

/// Anything that can be fed into a network.
pub trait Sample {
    /// The input vector, ordered like the network's input nodes.
    fn input(&self) -> &[f64];
}

/// A sample labelled with the output the network should produce.
pub trait SupervisedSample: Sample {
    /// The expected output vector, ordered like the network's output nodes.
    fn expected(&self) -> &[f64];
}

/// An owned, labelled training example.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearningSample {
    input: Vec<f64>,
    expected: Vec<f64>,
}

impl LearningSample {
    pub fn new<I, O>(input: I, expected: O) -> Self
    where
        I: Into<Vec<f64>>,
        O: Into<Vec<f64>>,
    {
        LearningSample {
            input: input.into(),
            expected: expected.into(),
        }
    }
}

impl Sample for LearningSample {
    fn input(&self) -> &[f64] {
        &self.input
    }
}

impl SupervisedSample for LearningSample {
    fn expected(&self) -> &[f64] {
        &self.expected
    }
}

/// `(network input, expected output)` pairs work as samples directly.
impl<I, O> Sample for (I, O)
where
    I: AsRef<[f64]>,
    O: AsRef<[f64]>,
{
    fn input(&self) -> &[f64] {
        self.0.as_ref()
    }
}

impl<I, O> SupervisedSample for (I, O)
where
    I: AsRef<[f64]>,
    O: AsRef<[f64]>,
{
    fn expected(&self) -> &[f64] {
        self.1.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_sample() {
        let sample = ([0.0, 1.0], [1.0]);
        assert_eq!(sample.input(), &[0.0, 1.0]);
        assert_eq!(sample.expected(), &[1.0]);
    }

    #[test]
    fn owned_sample() {
        let sample = LearningSample::new(vec![1.0, 0.0], vec![1.0]);
        assert_eq!(sample.input(), &[1.0, 0.0]);
        assert_eq!(sample.expected(), &[1.0]);
    }

    #[test]
    fn deserializes_from_json() {
        let sample: LearningSample =
            serde_json::from_str(r#"{"input":[0.0,0.0],"expected":[0.0]}"#).unwrap();
        assert_eq!(sample, LearningSample::new(vec![0.0, 0.0], vec![0.0]));
    }
}
