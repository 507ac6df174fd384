use log::warn;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    assert_interval,
    ds::QTable,
    error::{Error, Result},
    exploration::Exploration,
};

/// Which action value the bootstrap target is built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateRule {
    /// Off-policy: the greedy action in the next state
    #[default]
    QLearning,
    /// On-policy: an action sampled from the exploring policy in the next state
    Sarsa,
}

/// Configuration for the [`QTableAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct QTableAgentConfig {
    /// Discount factor, must lie in `(0, 1)`
    pub discount: f64,
    /// Largest reward a single step can yield, sets the optimistic initial values
    pub max_reward: f64,
    pub exploration: Exploration,
    pub rule: UpdateRule,
}

impl Default for QTableAgentConfig {
    fn default() -> Self {
        Self {
            discount: 0.9,
            max_reward: 1.0,
            exploration: Exploration::EpsilonGreedy,
            rule: UpdateRule::QLearning,
        }
    }
}

/// Snapshot of everything needed to rebuild a [`QTableAgent`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub n_states: usize,
    pub n_actions: usize,
    pub discount: f64,
    pub max_reward: f64,
    pub softmax: bool,
    pub sarsa: bool,
    pub q_table: QTable,
}

/// A Q-learning / SARSA agent over a dense table of action values
///
/// The table has `n_states * n_actions` rows and `n_actions` columns and starts out at
/// the optimistic value `max_reward / (1 - discount)`, which drives early exploration.
///
/// ### Generics
/// - `R` - The random source used for action sampling, seed it for reproducible runs
pub struct QTableAgent<R = StdRng> {
    q_table: QTable,
    n_states: usize,
    n_actions: usize,
    discount: f64,
    max_reward: f64,
    exploration: Exploration,
    rule: UpdateRule,
    rng: R,
}

impl QTableAgent<StdRng> {
    /// Initialize a new agent whose random source is a [`StdRng`] seeded with `seed`
    pub fn seeded(n_states: usize, n_actions: usize, config: QTableAgentConfig, seed: u64) -> Result<Self> {
        Self::new(n_states, n_actions, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QTableAgent<R> {
    /// Initialize a new agent with a freshly initialized optimistic table
    ///
    /// **Errors** if `n_actions < 2`, `n_states == 0`, `discount` is not in `(0, 1)` or
    /// `max_reward` is not finite
    pub fn new(n_states: usize, n_actions: usize, config: QTableAgentConfig, rng: R) -> Result<Self> {
        let QTableAgentConfig {
            discount,
            max_reward,
            exploration,
            rule,
        } = config;

        if n_actions < 2 {
            return Err(Error::TooFewActions { found: n_actions });
        }
        if n_states == 0 {
            return Err(Error::InvalidParameter {
                name: "n_states",
                value: 0.0,
                reason: "at least one state is required",
            });
        }
        if !(discount > 0.0 && discount < 1.0) {
            return Err(Error::InvalidParameter {
                name: "discount",
                value: discount,
                reason: "must lie in the open interval (0, 1)",
            });
        }
        if !max_reward.is_finite() {
            return Err(Error::InvalidParameter {
                name: "max_reward",
                value: max_reward,
                reason: "must be finite",
            });
        }

        Ok(Self {
            q_table: QTable::filled(n_states * n_actions, n_actions, max_reward / (1.0 - discount)),
            n_states,
            n_actions,
            discount,
            max_reward,
            exploration,
            rule,
            rng,
        })
    }

    /// Replace the value table with a previously learned one
    ///
    /// A table whose shape is not `(n_states * n_actions, n_actions)` is rejected with a
    /// warning and the current table is kept.
    pub fn with_table(mut self, q_table: QTable) -> Self {
        let expected = self.q_table.shape();
        if q_table.shape() == expected {
            self.q_table = q_table;
        } else {
            warn!(
                "Q table shape {:?} does not match [n_states * n_actions, n_actions] = {:?}, keeping the initial table",
                q_table.shape(),
                expected
            );
        }
        self
    }

    /// Rebuild an agent from an exported [`AgentState`]
    pub fn from_state(state: AgentState, rng: R) -> Result<Self> {
        let config = QTableAgentConfig {
            discount: state.discount,
            max_reward: state.max_reward,
            exploration: if state.softmax {
                Exploration::Softmax
            } else {
                Exploration::EpsilonGreedy
            },
            rule: if state.sarsa {
                UpdateRule::Sarsa
            } else {
                UpdateRule::QLearning
            },
        };
        Ok(Self::new(state.n_states, state.n_actions, config, rng)?.with_table(state.q_table))
    }

    /// Export the agent's parameters and learned values
    pub fn export_state(&self) -> AgentState {
        AgentState {
            n_states: self.n_states,
            n_actions: self.n_actions,
            discount: self.discount,
            max_reward: self.max_reward,
            softmax: self.exploration == Exploration::Softmax,
            sarsa: self.rule == UpdateRule::Sarsa,
            q_table: self.q_table.clone(),
        }
    }

    /// Choose an action in the flattened state `state` according to the exploration policy
    ///
    /// `param` is epsilon for epsilon greedy exploration and the temperature for softmax.
    pub fn select_action(&mut self, state: usize, param: f64) -> usize {
        self.exploration
            .choose(self.q_table.row(state), param, &mut self.rng)
    }

    /// The action with the highest value in `state`, lowest index on ties
    pub fn greedy_action(&self, state: usize) -> usize {
        self.q_table.argmax(state)
    }

    /// Move `Q(state, action)` towards the bootstrap target
    ///
    /// `target = reward + discount * Q(next_state, next_action)`, where `next_action` is
    /// greedy for Q-learning and drawn from the exploring policy (with `param`) for SARSA.
    ///
    /// **Panics** if `alpha` is not in the interval `[0,1]`
    pub fn update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        alpha: f64,
        param: f64,
    ) {
        assert_interval!(alpha, 0.0, 1.0);
        let next_action = match self.rule {
            UpdateRule::QLearning => self.greedy_action(next_state),
            UpdateRule::Sarsa => self.select_action(next_state, param),
        };

        let target = reward + self.discount * self.q_table[(next_state, next_action)];
        let q_value = &mut self.q_table[(state, action)];
        *q_value = (1.0 - alpha) * *q_value + alpha * target;
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn exploration(&self) -> Exploration {
        self.exploration
    }

    pub fn rule(&self) -> UpdateRule {
        self.rule
    }

    /// Short name of the agent's variant, e.g. `sarsa_softmax` or `no_sarsa`
    pub fn run_label(&self) -> String {
        let rule = match self.rule {
            UpdateRule::Sarsa => "sarsa",
            UpdateRule::QLearning => "no_sarsa",
        };
        match self.exploration {
            Exploration::Softmax => format!("{rule}_softmax"),
            Exploration::EpsilonGreedy => rule.to_string(),
        }
    }
}
