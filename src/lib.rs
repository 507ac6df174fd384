/// Tabular RL agents
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters and per-episode schedules
pub mod decay;

/// Data structures
pub mod ds;

/// Discrete control environment
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Single-qubit states, Hamiltonian and time evolution
pub mod quantum;

/// Time discretization
pub mod time;

/// Training loop
pub mod train;

mod util;

pub use error::{Error, Result};
