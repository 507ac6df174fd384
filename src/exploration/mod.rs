use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

mod epsilon_greedy;
mod softmax;

/// Action selection policy applied to one row of action values
///
/// The exploration parameter passed alongside is epsilon for [`Exploration::EpsilonGreedy`]
/// and the temperature for [`Exploration::Softmax`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exploration {
    /// The greedy action with probability `1 - epsilon`, the rest share `epsilon` evenly
    #[default]
    EpsilonGreedy,
    /// Boltzmann distribution over the action values with the given temperature
    Softmax,
}

impl Exploration {
    /// Probability of each action under this policy
    ///
    /// **Panics** if `q_values` has fewer than two entries or `param` is outside of the
    /// policy's admissible range
    pub fn weights(&self, q_values: &[f64], param: f64) -> Vec<f64> {
        assert!(q_values.len() >= 2, "At least two actions are required");
        match self {
            Self::EpsilonGreedy => epsilon_greedy::weights(q_values, param),
            Self::Softmax => softmax::weights(q_values, param),
        }
    }

    /// Sample an action index from [`Exploration::weights`]
    pub fn choose<R: Rng>(&self, q_values: &[f64], param: f64, rng: &mut R) -> usize {
        let dist = WeightedIndex::new(self.weights(q_values, param))
            .expect("action probabilities are non-negative and sum to one");
        dist.sample(rng)
    }
}
