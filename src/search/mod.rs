//! Adversarial game-tree search.
//!
//! A depth-bounded search over positions with one maximizing agent and
//! any number of adversaries, evaluated as minimizers (minimax, with or
//! without alpha-beta pruning) or as uniform chance nodes (expectimax).
//! The game rules and the evaluation function are collaborators reached
//! only through traits; the search holds no game knowledge of its own.

pub mod decision;
pub mod minimax;
pub mod position;

#[cfg(test)]
pub(crate) mod scripted;

pub use decision::{decide, decide_uniform, Decision};
pub use minimax::{SearchMode, SearchStats};
pub use position::{AgentIndex, Position, SearchError};
