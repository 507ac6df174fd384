pub mod tabular;

pub use tabular::q_table::{AgentState, QTableAgent, QTableAgentConfig, UpdateRule};
