//! Activation functions.

use std::fmt::Debug;

/// The contract every neuron's activation function fulfills.
///
/// Both methods take the neuron's weighted input sum `x`. Implementations
/// must be pure: the same `x` always gives the same result.
pub trait ActivationFunction: Debug + Send + Sync {
    /// Evaluates `f(x)`.
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluates the derivative `f'(x)`.
    fn derivative(&self, x: f64) -> f64;
}

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Activator {
    /// Rectified Linear Unit
    ReLU,
    /// Leaky Rectified Linear Unit
    ///
    /// Takes an `alpha` value to use for negative inputs.
    LeakyReLU(f64),
    /// Sigmoid function
    Sigmoid,
    /// Logistic function with the provided steepness, `1 / (1 + e^(-kx))`.
    Logistic(f64),
    /// Hyperbolic tan function
    TanH,
}

impl ActivationFunction for Activator {
    fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Activator::ReLU => if x > 0.0 { x } else { 0.0 },
            Activator::LeakyReLU(alpha) => if x > 0.0 { x } else { alpha * x },
            Activator::Sigmoid => logistic(x),
            Activator::Logistic(k) => logistic(k * x),
            Activator::TanH => x.tanh(),
        }
    }

    fn derivative(&self, x: f64) -> f64 {
        match *self {
            Activator::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activator::LeakyReLU(alpha) => if x > 0.0 { 1.0 } else { alpha },
            Activator::Sigmoid => {
                let y = logistic(x);
                y * (1.0 - y)
            }
            Activator::Logistic(k) => {
                let y = logistic(k * x);
                k * y * (1.0 - y)
            }
            Activator::TanH => {
                let y = x.tanh();
                1.0 - y * y
            }
        }
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [Activator; 5] = [Activator::ReLU,
                                 Activator::LeakyReLU(0.01),
                                 Activator::Sigmoid,
                                 Activator::Logistic(0.5),
                                 Activator::TanH];

    #[test]
    fn sigmoid_midpoint() {
        assert_eq!(Activator::Sigmoid.evaluate(0.0), 0.5);
        assert_eq!(Activator::Sigmoid.derivative(0.0), 0.25);
    }

    #[test]
    fn logistic_steepness() {
        let f = Activator::Logistic(2.0);
        assert_abs_diff_eq!(f.evaluate(1.5), Activator::Sigmoid.evaluate(3.0));
        assert_abs_diff_eq!(f.derivative(0.0), 0.5);
    }

    #[test]
    fn rectifiers() {
        assert_eq!(Activator::ReLU.evaluate(-2.0), 0.0);
        assert_eq!(Activator::ReLU.evaluate(2.0), 2.0);
        assert_eq!(Activator::ReLU.derivative(-2.0), 0.0);
        assert_eq!(Activator::LeakyReLU(0.1).evaluate(-2.0), -0.2);
        assert_eq!(Activator::LeakyReLU(0.1).derivative(-2.0), 0.1);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for f in ALL.iter() {
            for &x in &[-1.7, -0.3, 0.4, 2.2] {
                let numeric = (f.evaluate(x + h) - f.evaluate(x - h)) / (2.0 * h);
                assert_abs_diff_eq!(f.derivative(x), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn deserializes_from_json() {
        let f: Activator = serde_json::from_str(r#"{"Logistic":0.888}"#).unwrap();
        assert_eq!(f, Activator::Logistic(0.888));
    }
}
