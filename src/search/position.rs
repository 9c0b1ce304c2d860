//! The collaborator contract consumed by the search.
//!
//! The search never inspects game rules directly: it sees a position only
//! through this trait, and a position's worth only through an
//! [`Evaluator`](crate::eval::Evaluator). Any turn-based game with one
//! controlled agent and any number of adversaries can plug in here.

use thiserror::Error;

/// Index of an agent at a position. Agent 0 is the controlled
/// (maximizing) agent; agents `1..num_agents` are adversaries.
pub type AgentIndex = usize;

/// Errors surfaced by the search or its collaborators.
///
/// None of these are recoverable: each indicates a caller or rules-engine
/// bug, and the search is deterministic, so retrying cannot help. A failed
/// call leaves no shared state behind to corrupt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// A successor was requested for a move outside the legal set.
    #[error("illegal move for agent {agent}")]
    InvalidMove { agent: AgentIndex },

    /// A non-terminal position offered no legal moves for the agent to
    /// move; the rules engine broke its contract.
    #[error("non-terminal position has no legal moves for agent {agent}")]
    IllFormedPosition { agent: AgentIndex },

    /// `decide` was invoked where the controlled agent cannot move; the
    /// caller must check terminality first.
    #[error("controlled agent has no legal move at the search root")]
    NoLegalMove,
}

/// A complete, immutable game snapshot as the search sees it.
///
/// Implementations must guarantee that [`successor`](Position::successor)
/// is pure: generating a successor never mutates the receiver, so a
/// partially explored tree never corrupts sibling branches.
pub trait Position: Sized {
    /// An opaque move token. The search only ever compares moves for
    /// equality and hands them back to `successor`.
    type Move: Clone + PartialEq;

    /// Number of agents acting at this position, always `>= 1`.
    fn num_agents(&self) -> usize;

    /// Legal moves for `agent`, in the engine's enumeration order.
    /// Empty if and only if the position is terminal.
    fn legal_moves(&self, agent: AgentIndex) -> Vec<Self::Move>;

    /// The position after `agent` plays `mv`.
    ///
    /// Fails with [`SearchError::InvalidMove`] if `mv` is not in
    /// `legal_moves(agent)`.
    fn successor(&self, agent: AgentIndex, mv: &Self::Move) -> Result<Self, SearchError>;

    /// True once the game is decided (won or lost).
    fn is_terminal(&self) -> bool;
}

/// Returns the agent to move after `agent`, and the updated count of
/// completed rounds. The count increments exactly when the turn wraps
/// back to agent 0, never mid-round.
pub(crate) fn next_turn(agent: AgentIndex, num_agents: usize, rounds: u32) -> (AgentIndex, u32) {
    let next = (agent + 1) % num_agents;
    let rounds = if next == 0 { rounds + 1 } else { rounds };
    (next, rounds)
}
