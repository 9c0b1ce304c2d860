//! Game state representation.
//!
//! Holds the complete snapshot of a pursuit game at a given point in time:
//! the shared maze layout, remaining food, agent positions and headings,
//! the running score, and whether the game has been decided.

use std::sync::Arc;

use super::action::Action;
use super::grid::{Grid, Pos};

/// Index of the controlled agent. Chasers occupy indices `1..`.
pub const RUNNER: usize = 0;

/// Whether the game is still running or has been decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Won,
    Lost,
}

/// One agent's position and the direction it last moved.
///
/// The heading starts as `Stop`, which places no constraint on a chaser's
/// first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentState {
    pub pos: Pos,
    pub heading: Action,
}

impl AgentState {
    pub const fn at(pos: Pos) -> AgentState {
        AgentState {
            pos,
            heading: Action::Stop,
        }
    }
}

/// Complete game state at a point in time.
///
/// The wall layout is shared (`Arc`) between every state derived from one
/// root position; food, agents, score, and status are owned per state, so
/// cloning a state for successor generation copies only the mutable parts.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    grid: Arc<Grid>,
    food: Vec<bool>,
    food_remaining: u32,
    agents: Vec<AgentState>,
    score: i32,
    status: Status,
}

impl GameState {
    /// Assembles a state from a layout, food flags, and agent list.
    ///
    /// `agents[0]` is the runner. The status is derived: a board with no
    /// food is already won, and a runner sharing a cell with a chaser is
    /// already lost. A capture takes precedence over an empty board.
    pub fn new(grid: Arc<Grid>, food: Vec<bool>, agents: Vec<AgentState>) -> GameState {
        assert_eq!(food.len(), grid.len());
        assert!(!agents.is_empty(), "a state needs at least the runner");
        let food_remaining = food.iter().filter(|f| **f).count() as u32;

        let runner = agents[RUNNER].pos;
        let captured = agents[1..].iter().any(|a| a.pos == runner);
        let status = if captured {
            Status::Lost
        } else if food_remaining == 0 {
            Status::Won
        } else {
            Status::Ongoing
        };

        GameState {
            grid,
            food,
            food_remaining,
            agents,
            score: 0,
            status,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    pub fn agent(&self, index: usize) -> &AgentState {
        &self.agents[index]
    }

    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    pub fn runner_pos(&self) -> Pos {
        self.agents[RUNNER].pos
    }

    pub fn has_food_at(&self, pos: Pos) -> bool {
        self.grid.in_bounds(pos) && self.food[self.grid.index(pos)]
    }

    pub fn food_remaining(&self) -> u32 {
        self.food_remaining
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Ongoing
    }

    // Mutators are crate-private: only the rules in `movegen` may advance
    // a state, and only on a fresh clone.

    pub(crate) fn agent_mut(&mut self, index: usize) -> &mut AgentState {
        &mut self.agents[index]
    }

    pub(crate) fn add_score(&mut self, delta: i32) {
        self.score += delta;
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Clears the food flag at `pos`. Returns true if food was present.
    pub(crate) fn take_food(&mut self, pos: Pos) -> bool {
        let idx = self.grid.index(pos);
        if self.food[idx] {
            self.food[idx] = false;
            self.food_remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: i16, height: i16) -> Arc<Grid> {
        Arc::new(Grid::new(
            width,
            height,
            vec![false; (width * height) as usize],
        ))
    }

    fn food_at(grid: &Grid, cells: &[Pos]) -> Vec<bool> {
        let mut food = vec![false; grid.len()];
        for &p in cells {
            food[grid.index(p)] = true;
        }
        food
    }

    #[test]
    fn fresh_state_is_ongoing() {
        let grid = open_grid(4, 4);
        let food = food_at(&grid, &[Pos::new(3, 3)]);
        let state = GameState::new(
            grid,
            food,
            vec![
                AgentState::at(Pos::new(0, 0)),
                AgentState::at(Pos::new(2, 2)),
            ],
        );
        assert_eq!(state.status(), Status::Ongoing);
        assert_eq!(state.food_remaining(), 1);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn foodless_board_is_won() {
        let grid = open_grid(3, 3);
        let food = vec![false; grid.len()];
        let state = GameState::new(grid, food, vec![AgentState::at(Pos::new(0, 0))]);
        assert_eq!(state.status(), Status::Won);
        assert!(state.is_over());
    }

    #[test]
    fn colocated_chaser_is_lost() {
        let grid = open_grid(3, 3);
        let food = food_at(&grid, &[Pos::new(2, 2)]);
        let state = GameState::new(
            grid,
            food,
            vec![
                AgentState::at(Pos::new(1, 1)),
                AgentState::at(Pos::new(1, 1)),
            ],
        );
        assert_eq!(state.status(), Status::Lost);
    }

    #[test]
    fn take_food_decrements_remaining() {
        let grid = open_grid(3, 3);
        let food = food_at(&grid, &[Pos::new(0, 1), Pos::new(2, 2)]);
        let mut state = GameState::new(grid, food, vec![AgentState::at(Pos::new(0, 0))]);
        assert!(state.take_food(Pos::new(0, 1)));
        assert_eq!(state.food_remaining(), 1);
        assert!(!state.take_food(Pos::new(0, 1)));
    }

    #[test]
    fn clone_shares_grid() {
        let grid = open_grid(5, 5);
        let food = food_at(&grid, &[Pos::new(4, 4)]);
        let state = GameState::new(grid, food, vec![AgentState::at(Pos::new(0, 0))]);
        let copy = state.clone();
        assert!(std::ptr::eq(state.grid(), copy.grid()));
    }
}
