use std::f64::consts::FRAC_1_SQRT_2;

use log::{debug, info, warn};
use num_complex::Complex64;
use rand::Rng;

use crate::{
    algo::QTableAgent,
    decay::Schedule,
    env::{ControlEnv, DiscreteState, FieldActions},
    error::{Error, Result},
    exploration::Exploration,
    quantum::{self, Propagator, QState},
    time::time_grid,
};

/// Parameters of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Number of episodes
    pub episodes: usize,
    /// Number of time steps per episode
    pub episode_length: usize,
    /// Duration of one time step
    pub dt: f64,
    /// Control field applied by each action, in action order
    pub fields: Vec<f64>,
    /// Discrete state every episode starts from
    pub start: DiscreteState,
    /// Qubit state to steer towards
    pub target: QState,
    /// Qubit state every episode starts from
    pub initial: QState,
    /// Exploration parameter of each episode
    pub epsilon: Schedule,
    /// Learning rate of each episode
    pub alpha: Schedule,
    /// Log progress every `n` episodes
    pub report_interval: Option<usize>,
    /// Record the discrete path of each episode
    pub history: bool,
    /// Warn whenever an evolved state loses its unit norm
    pub check_norm: bool,
    pub norm_tolerance: f64,
}

impl Default for TrainConfig {
    /// Steer `(1+i)/√2 |0>` to `-(1+i)/√2 |1>` in 3 time units with fields of ±4
    fn default() -> Self {
        const EPISODES: usize = 10_000;
        let amplitude = Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        let zero = Complex64::new(0.0, 0.0);

        Self {
            episodes: EPISODES,
            episode_length: time_grid(3.0, 0.025).len(),
            dt: 0.025,
            fields: vec![-4.0, 4.0],
            start: DiscreteState::default(),
            target: vec![zero, -amplitude],
            initial: vec![amplitude, zero],
            epsilon: Schedule::linspace(0.8, 0.001, EPISODES),
            alpha: Schedule::constant(0.8, EPISODES),
            report_interval: Some(5_000),
            history: false,
            check_norm: true,
            norm_tolerance: 1e-13,
        }
    }
}

impl TrainConfig {
    /// Number of discrete states an agent for this problem should be built with
    pub fn n_states(&self) -> usize {
        self.episode_length * self.fields.len()
    }

    pub fn n_actions(&self) -> usize {
        self.fields.len()
    }

    /// Check the configuration against itself and against the agent's table
    fn validate<R: Rng>(&self, agent: &QTableAgent<R>) -> Result<FieldActions> {
        if self.target.len() != self.initial.len() {
            return Err(Error::DimensionMismatch {
                target: self.target.len(),
                start: self.initial.len(),
            });
        }
        let fields = FieldActions::new(self.fields.clone())?;
        let n_actions = fields.len();

        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "dt",
                value: self.dt,
                reason: "time step must be positive and finite",
            });
        }
        if !(self.norm_tolerance > 0.0) {
            return Err(Error::InvalidParameter {
                name: "norm_tolerance",
                value: self.norm_tolerance,
                reason: "tolerance must be positive",
            });
        }

        let epsilon_max = match agent.exploration() {
            Exploration::EpsilonGreedy => 1.0,
            Exploration::Softmax => f64::MAX,
        };
        self.epsilon.validate("epsilon", self.episodes, 0.0, epsilon_max)?;
        self.alpha.validate("alpha", self.episodes, 0.0, 1.0)?;

        if self.start.action >= n_actions {
            return Err(Error::StateOutOfRange {
                time: self.start.time,
                action: self.start.action,
                n_actions,
            });
        }
        if agent.n_actions() != n_actions {
            return Err(Error::ActionCountMismatch {
                agent: agent.n_actions(),
                env: n_actions,
            });
        }
        // the state reached after the last step is bootstrapped from, so it needs a row too
        let required = (self.start.time + self.episode_length + 1) * n_actions;
        let rows = agent.q_table().shape().0;
        if rows < required {
            return Err(Error::TableTooSmall { rows, required });
        }

        Ok(fields)
    }
}

/// Outcome of a training run
#[derive(Debug, Clone)]
pub struct Training {
    /// Environment of the last episode
    pub env: ControlEnv,
    /// Fidelity reached at the end of each episode
    pub rewards: Vec<f64>,
}

impl Training {
    /// `(episode, reward)` of the best episode, the earliest one on ties
    pub fn best(&self) -> Option<(usize, f64)> {
        self.rewards
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, r)| match best {
                Some((_, b)) if b >= r => best,
                _ => Some((i, r)),
            })
    }
}

/// Train `agent` on the control problem described by `config`
///
/// Each episode starts a fresh [`ControlEnv`] at `config.start` with the qubit in
/// `config.initial`, and takes `config.episode_length` steps. After every step the reward
/// is `fidelity(target, qstate)` and the agent is updated with the episode's scheduled
/// `alpha` and `epsilon`. The reward of an episode is the reward of its last step.
///
/// - `evolve` - advances a qubit state by `dt` under a field: `evolve(qstate, dt, field)`
/// - `fidelity` - overlap of two qubit states: `fidelity(target, qstate)`
///
/// **Errors** if the configuration is inconsistent (checked before any simulation) or
/// if `evolve` fails
pub fn train<R, E, F>(
    agent: &mut QTableAgent<R>,
    config: &TrainConfig,
    mut evolve: E,
    fidelity: F,
) -> Result<Training>
where
    R: Rng,
    E: FnMut(&[Complex64], f64, f64) -> Result<QState>,
    F: Fn(&[Complex64], &[Complex64]) -> f64,
{
    let fields = config.validate(agent)?;
    let n_actions = fields.len();
    debug!(
        "Training {} agent for {} episodes of {} steps with fields {:?}",
        agent.run_label(),
        config.episodes,
        config.episode_length,
        fields.as_slice()
    );

    let mut env = ControlEnv::new(config.start, fields.clone(), config.history);
    let mut rewards = Vec::with_capacity(config.episodes);

    for episode in 0..config.episodes {
        let (epsilon, alpha) = (config.epsilon[episode], config.alpha[episode]);
        env = ControlEnv::new(config.start, fields.clone(), config.history);
        let mut qstate = config.initial.clone();
        let mut reward = 0.0;

        for _ in 0..config.episode_length {
            let state = env.index();
            let action = agent.select_action(state, epsilon);
            let (next_state, next_qstate) = env.step(action, qstate.as_slice(), config.dt, &mut evolve)?;
            qstate = next_qstate;

            if config.check_norm {
                let deviation = (1.0 - fidelity(qstate.as_slice(), qstate.as_slice())).abs();
                if deviation > config.norm_tolerance {
                    warn!("Norm is not conserved: |1 - <psi|psi>| = {deviation:e} in episode {episode}");
                }
            }

            reward = fidelity(config.target.as_slice(), qstate.as_slice());
            agent.update(state, action, reward, next_state.index(n_actions), alpha, epsilon);
        }

        rewards.push(reward);

        if let Some(interval) = config.report_interval.filter(|&n| n > 0) {
            if (episode + 1) % interval == 0 {
                info!("Episode {}: fidelity {:.6} (epsilon {:.4}, alpha {:.4})", episode + 1, reward, epsilon, alpha);
            }
        }
    }

    let training = Training { env, rewards };
    if let Some((episode, reward)) = training.best() {
        debug!("Best fidelity {reward:.6} reached in episode {}", episode + 1);
    }
    Ok(training)
}

/// [`train`] with the built-in single-qubit evolution and fidelity
pub fn train_with<R: Rng>(
    agent: &mut QTableAgent<R>,
    config: &TrainConfig,
    propagator: Propagator,
) -> Result<Training> {
    train(
        agent,
        config,
        |qstate, dt, field| quantum::evolve(qstate, dt, field, propagator),
        quantum::fidelity,
    )
}
