use std::sync::Arc;

use num_complex::Complex64;

use crate::{
    error::{Error, Result},
    quantum::QState,
};

/// The Markov state seen by a tabular agent: elapsed steps and the last applied action
///
/// The physical qubit state is deliberately not part of it, so the number of discrete
/// states stays finite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteState {
    /// Number of completed time steps
    pub time: usize,
    /// Index of the most recently applied field action
    pub action: usize,
}

impl DiscreteState {
    pub fn new(time: usize, action: usize) -> Self {
        Self { time, action }
    }

    /// Flatten to a row index of the value table: `time * n_actions + action`
    pub fn index(&self, n_actions: usize) -> usize {
        debug_assert!(self.action < n_actions, "action {} out of range", self.action);
        self.time * n_actions + self.action
    }

    /// Inverse of [`DiscreteState::index`]
    pub fn from_index(index: usize, n_actions: usize) -> Self {
        Self {
            time: index / n_actions,
            action: index % n_actions,
        }
    }
}

impl From<[usize; 2]> for DiscreteState {
    fn from([time, action]: [usize; 2]) -> Self {
        Self { time, action }
    }
}

/// Ordered, immutable table mapping an action index to a control field value
///
/// Cloning is cheap, every environment of a training run shares the same table.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldActions {
    fields: Arc<[f64]>,
}

impl FieldActions {
    /// **Errors** if fewer than two fields are given or a field is not finite
    pub fn new(fields: impl Into<Vec<f64>>) -> Result<Self> {
        let fields = fields.into();
        if fields.len() < 2 {
            return Err(Error::TooFewActions {
                found: fields.len(),
            });
        }
        if let Some(&value) = fields.iter().find(|f| !f.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "field",
                value,
                reason: "field values must be finite",
            });
        }
        Ok(Self {
            fields: fields.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field value of `action`, if it exists
    pub fn get(&self, action: usize) -> Option<f64> {
        self.fields.get(action).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.fields
    }

    /// All action indices, in order
    pub fn actions(&self) -> impl Iterator<Item = usize> {
        0..self.fields.len()
    }
}

/// Discrete time control environment for a single qubit
///
/// Every [`step`](ControlEnv::step) applies one field for one time step and moves the
/// discrete state from `(t, a)` to `(t + 1, action)`. The environment never terminates
/// on its own; the caller decides how many steps make an episode.
#[derive(Debug, Clone)]
pub struct ControlEnv {
    state: DiscreteState,
    fields: FieldActions,
    path: Option<Vec<DiscreteState>>,
}

impl ControlEnv {
    /// Create an environment positioned at `start`
    ///
    /// With `history` enabled every visited discrete state is recorded, starting with `start`.
    pub fn new(start: DiscreteState, fields: FieldActions, history: bool) -> Self {
        Self {
            state: start,
            fields,
            path: history.then(|| vec![start]),
        }
    }

    pub fn state(&self) -> DiscreteState {
        self.state
    }

    /// Row index of the current state in a value table
    pub fn index(&self) -> usize {
        self.state.index(self.fields.len())
    }

    pub fn fields(&self) -> &FieldActions {
        &self.fields
    }

    pub fn n_actions(&self) -> usize {
        self.fields.len()
    }

    /// The visited discrete states, if history recording is enabled
    pub fn path(&self) -> Option<&[DiscreteState]> {
        self.path.as_deref()
    }

    /// Apply `action` for one time step of length `dt`
    ///
    /// `evolve` receives the qubit state, `dt` and the field of `action`, and returns the
    /// evolved qubit state. The discrete state only advances if the evolution succeeds.
    ///
    /// **Returns** `(next_state, next_qstate)`
    ///
    /// **Panics** if `action` is not a valid action index
    pub fn step<F>(
        &mut self,
        action: usize,
        qstate: &[Complex64],
        dt: f64,
        evolve: F,
    ) -> Result<(DiscreteState, QState)>
    where
        F: FnOnce(&[Complex64], f64, f64) -> Result<QState>,
    {
        let field = self
            .fields
            .get(action)
            .unwrap_or_else(|| panic!("Invalid action: {}", action));
        let qstate = evolve(qstate, dt, field)?;

        self.state = DiscreteState::new(self.state.time + 1, action);
        if let Some(path) = &mut self.path {
            path.push(self.state);
        }

        Ok((self.state, qstate))
    }
}
