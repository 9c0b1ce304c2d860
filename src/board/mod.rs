//! Board representation and game-state types.
//!
//! Contains the core data structures for the maze grid, agent actions,
//! and the overall game state.

pub mod action;
pub mod grid;
pub mod state;

pub use action::{Action, DIRECTIONS};
pub use grid::{Grid, Pos};
pub use state::{AgentState, GameState, Status, RUNNER};
