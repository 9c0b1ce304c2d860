//! Legal move generation and transition rules.
//!
//! Enumerates the legal actions for each agent and generates successor
//! states. Successor generation is pure: it clones the state, so a
//! partially explored search tree never corrupts sibling branches. This
//! module is also where `GameState` meets the search's `Position`
//! contract.

use rand::Rng;

use crate::board::{Action, GameState, Status, DIRECTIONS, RUNNER};
use crate::search::{AgentIndex, Position, SearchError};

/// Score for eating one food pellet.
pub const FOOD_SCORE: i32 = 10;
/// Bonus for clearing the last pellet.
pub const WIN_SCORE: i32 = 500;
/// Penalty for getting caught.
pub const LOSE_SCORE: i32 = 500;
/// Cost of every runner move, Stop included.
pub const TIME_PENALTY: i32 = 1;

/// Returns the legal actions for `agent`, in canonical enumeration order
/// (the four directions, then Stop for the runner).
///
/// The runner may stand still; chasers may not, and may not reverse
/// their heading unless reversing is their only open direction. A
/// decided game has no legal actions for anyone.
pub fn legal_actions(state: &GameState, agent: AgentIndex) -> Vec<Action> {
    if state.is_over() {
        return Vec::new();
    }

    let a = state.agent(agent);
    let mut actions: Vec<Action> = DIRECTIONS
        .iter()
        .copied()
        .filter(|&d| !state.grid().is_wall(a.pos.step(d)))
        .collect();

    if agent == RUNNER {
        actions.push(Action::Stop);
    } else if actions.len() > 1 {
        let reverse = a.heading.reverse();
        actions.retain(|&d| d != reverse);
    }

    actions
}

/// Returns the state after `agent` takes `action`.
///
/// Runner moves pay the time penalty, eat food on arrival, and can win
/// (last pellet) or lose (stepping onto a chaser). Chaser moves can only
/// lose the game for the runner. A win and a capture in the same runner
/// step resolve in the runner's favor: the pellet is eaten before contact
/// is checked.
pub fn successor(
    state: &GameState,
    agent: AgentIndex,
    action: Action,
) -> Result<GameState, SearchError> {
    if !legal_actions(state, agent).contains(&action) {
        return Err(SearchError::InvalidMove { agent });
    }

    let mut next = state.clone();
    let pos = next.agent(agent).pos.step(action);
    {
        let a = next.agent_mut(agent);
        a.pos = pos;
        a.heading = action;
    }

    if agent == RUNNER {
        next.add_score(-TIME_PENALTY);
        if next.take_food(pos) {
            next.add_score(FOOD_SCORE);
            if next.food_remaining() == 0 {
                next.set_status(Status::Won);
                next.add_score(WIN_SCORE);
            }
        }
        let caught = next.agents()[1..].iter().any(|c| c.pos == pos);
        if caught && next.status() != Status::Won {
            next.set_status(Status::Lost);
            next.add_score(-LOSE_SCORE);
        }
    } else if pos == next.runner_pos() {
        next.set_status(Status::Lost);
        next.add_score(-LOSE_SCORE);
    }

    Ok(next)
}

/// Picks a uniformly random legal action for `agent`.
///
/// Returns `None` when the game is over. Used as the engine's fallback
/// and as the uniform chaser policy in simulation.
pub fn random_action(state: &GameState, agent: AgentIndex, rng: &mut impl Rng) -> Option<Action> {
    let legal = legal_actions(state, agent);
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.gen_range(0..legal.len())])
}

impl Position for GameState {
    type Move = Action;

    fn num_agents(&self) -> usize {
        GameState::num_agents(self)
    }

    fn legal_moves(&self, agent: AgentIndex) -> Vec<Action> {
        legal_actions(self, agent)
    }

    fn successor(&self, agent: AgentIndex, mv: &Action) -> Result<GameState, SearchError> {
        successor(self, agent, *mv)
    }

    fn is_terminal(&self) -> bool {
        self.is_over()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::protocol::pfen::parse_pfen;

    #[test]
    fn runner_actions_respect_walls_and_include_stop() {
        // Runner at the closed end of a corridor: east or stand still.
        let state = parse_pfen("#####|#R.C#|#####/0").unwrap();
        let actions = legal_actions(&state, RUNNER);
        assert_eq!(actions, vec![Action::East, Action::Stop]);
    }

    #[test]
    fn open_cell_offers_all_four_directions() {
        let state = parse_pfen("#####|#-.-#|#-R-#|#-C-#|#####/0").unwrap();
        let actions = legal_actions(&state, RUNNER);
        assert_eq!(
            actions,
            vec![
                Action::North,
                Action::South,
                Action::East,
                Action::West,
                Action::Stop
            ]
        );
    }

    #[test]
    fn chasers_never_stop() {
        let state = parse_pfen("#####|#R.C#|#####/0").unwrap();
        let actions = legal_actions(&state, 1);
        assert!(!actions.contains(&Action::Stop));
        assert_eq!(actions, vec![Action::West]);
    }

    #[test]
    fn chaser_cannot_reverse_mid_corridor() {
        let state = parse_pfen("######|#R.C-#|######/0").unwrap();
        // March the chaser west; its next turn must not offer east.
        let state = successor(&state, 1, Action::West).unwrap();
        let actions = legal_actions(&state, 1);
        assert_eq!(actions, vec![Action::West]);
    }

    #[test]
    fn chaser_may_reverse_out_of_a_dead_end() {
        let state = parse_pfen("#####|#R.C#|###-#|#####/0").unwrap();
        // Chaser walks south into the dead end; reversing back north is
        // then its only option.
        let state = successor(&state, 1, Action::South).unwrap();
        let actions = legal_actions(&state, 1);
        assert_eq!(actions, vec![Action::North]);
    }

    #[test]
    fn terminal_state_has_no_actions_for_anyone() {
        // A foodless board parses as already won.
        let state = parse_pfen("####|#RC#|####/0").unwrap();
        assert_eq!(state.status(), Status::Won);
        assert!(legal_actions(&state, RUNNER).is_empty());
        assert!(legal_actions(&state, 1).is_empty());
    }

    #[test]
    fn illegal_action_is_rejected() {
        let state = parse_pfen("#####|#R.C#|#####/0").unwrap();
        let err = successor(&state, RUNNER, Action::North).unwrap_err();
        assert_eq!(err, SearchError::InvalidMove { agent: RUNNER });
    }

    #[test]
    fn successor_leaves_the_input_untouched() {
        let state = parse_pfen("#####|#R.C#|#####/0").unwrap();
        let before = state.clone();
        let _ = successor(&state, RUNNER, Action::East).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn runner_move_costs_the_time_penalty() {
        let state = parse_pfen("#####|#R-.#|#####/0").unwrap();
        let next = successor(&state, RUNNER, Action::East).unwrap();
        assert_eq!(next.score(), -TIME_PENALTY);
        assert_eq!(next.status(), Status::Ongoing);
    }

    #[test]
    fn eating_food_scores() {
        let state = parse_pfen("#####|#R..#|#####/0").unwrap();
        let next = successor(&state, RUNNER, Action::East).unwrap();
        assert_eq!(next.score(), FOOD_SCORE - TIME_PENALTY);
        assert_eq!(next.food_remaining(), 1);
    }

    #[test]
    fn clearing_the_last_pellet_wins() {
        let state = parse_pfen("####|#R.#|####/0").unwrap();
        let next = successor(&state, RUNNER, Action::East).unwrap();
        assert_eq!(next.status(), Status::Won);
        assert_eq!(next.score(), FOOD_SCORE - TIME_PENALTY + WIN_SCORE);
    }

    #[test]
    fn stepping_onto_a_chaser_loses() {
        let state = parse_pfen("#####|#RC.#|#####/0").unwrap();
        let next = successor(&state, RUNNER, Action::East).unwrap();
        assert_eq!(next.status(), Status::Lost);
        assert_eq!(next.score(), -TIME_PENALTY - LOSE_SCORE);
    }

    #[test]
    fn chaser_stepping_onto_the_runner_loses() {
        let state = parse_pfen("#####|#RC.#|#####/0").unwrap();
        let next = successor(&state, 1, Action::West).unwrap();
        assert_eq!(next.status(), Status::Lost);
        assert_eq!(next.score(), -LOSE_SCORE);
    }

    #[test]
    fn winning_step_onto_a_chaser_still_wins() {
        // Drive the chaser onto the last pellet, then have the runner eat
        // it: the pellet is consumed before contact is checked, so the
        // win stands.
        let state = parse_pfen("#####|#R.C#|#####/0").unwrap();
        let state = successor(&state, 1, Action::West).unwrap();
        assert_eq!(state.food_remaining(), 1);
        let next = successor(&state, RUNNER, Action::East).unwrap();
        assert_eq!(next.status(), Status::Won);
    }

    #[test]
    fn random_action_is_legal_and_seeded() {
        let state = parse_pfen("#####|#-.-#|#-R-#|#-C-#|#####/0").unwrap();
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let action = random_action(&state, RUNNER, &mut rng).unwrap();
            assert!(legal_actions(&state, RUNNER).contains(&action));
        }
        let a = random_action(&state, RUNNER, &mut SmallRng::seed_from_u64(9)).unwrap();
        let b = random_action(&state, RUNNER, &mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn random_action_none_when_over() {
        let state = parse_pfen("####|#RC#|####/0").unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(random_action(&state, RUNNER, &mut rng), None);
    }
}
