//! Tabular Q-learning on grid maps
//!
//! An agent starts on a map loaded from a file and learns, over many episodes, to walk to
//! the objective cell while collecting bonuses and staying off traps.

/// The Q-table agent and its training loop
pub mod algo;

/// Run configuration
pub mod config;

/// Implementations of strategies for time-varying hyperparameters
pub mod decay;

/// Data structures
pub mod ds;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// The grid world environment
pub mod gym;

/// Per-episode training history
pub mod history;

/// Drawing of observed episodes
pub mod render;

/// Terminal UI
#[cfg(feature = "viz")]
pub mod viz;

mod util;
