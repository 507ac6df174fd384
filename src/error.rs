use thiserror::Error;

/// Errors raised while configuring or running a control problem
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Evolution is only defined for a single two-level system
    #[error("unsupported state dimension {found}: only single-qubit (dimension 2) states can be evolved")]
    UnsupportedDimension { found: usize },

    /// Target and initial quantum states have a different number of amplitudes
    #[error("target state has {target} amplitudes but initial state has {start}")]
    DimensionMismatch { target: usize, start: usize },

    /// The field action set needs at least two entries for epsilon greedy exploration
    #[error("action set must contain at least 2 field values, got {found}")]
    TooFewActions { found: usize },

    /// A per-episode schedule does not cover every episode
    #[error("`{name}` schedule has {found} entries, expected {expected}")]
    ScheduleLength {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    /// A scalar parameter is outside of its admissible range
    #[error("invalid value {value} for `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The starting discrete state names an action that does not exist
    #[error("start state ({time}, {action}) refers to an action outside of 0..{n_actions}")]
    StateOutOfRange {
        time: usize,
        action: usize,
        n_actions: usize,
    },

    /// The agent's value table cannot index every state an episode may visit
    #[error("value table has {rows} rows but the episode needs {required}")]
    TableTooSmall { rows: usize, required: usize },

    /// Agent and environment disagree on the number of actions
    #[error("agent has {agent} actions but the environment has {env}")]
    ActionCountMismatch { agent: usize, env: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
