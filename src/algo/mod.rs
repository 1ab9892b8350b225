pub mod q_table;

pub use q_table::{EpisodeSummary, QTableAgent, QTableAgentConfig};

use crate::gym::{Action, Pos};

/// A single transition of the agent through the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exp {
    /// The position before taking the action
    pub state: Pos,
    /// The action taken at that position
    pub action: Action,
    /// The position after the action, or if the objective was reached, `None`
    pub next_state: Option<Pos>,
    /// The reward received after taking the action
    pub reward: f64,
}
