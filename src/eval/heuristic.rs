//! Heuristic position evaluation.
//!
//! Two evaluation functions over pursuit positions, both scored from the
//! runner's perspective. `ScoreEvaluator` is the bare game score and the
//! correctness reference for adversarial search; `ProximityEvaluator`
//! shapes the score with maze-aware distances so depth-limited searches
//! have a gradient to climb between pellets.
//!
//! Distances are true shortest paths through the walls, computed by BFS
//! from the runner's cell -- one traversal per evaluation serves both the
//! food and the threat terms.

use std::collections::VecDeque;

use crate::board::{Grid, GameState, Pos, DIRECTIONS};

use super::Evaluator;

/// The game score, verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator;

impl Evaluator<GameState> for ScoreEvaluator {
    fn evaluate(&self, state: &GameState) -> f64 {
        state.score() as f64
    }
}

/// Score shaped by distance to food and to the nearest chasers.
#[derive(Debug, Clone, Copy)]
pub struct ProximityEvaluator {
    /// Cost per cell of maze distance to the nearest pellet.
    pub food_weight: f64,
    /// Chasers at or inside this maze distance depress the value.
    pub threat_radius: i32,
    /// Penalty per cell a threatening chaser sits inside the radius.
    pub threat_weight: f64,
}

impl Default for ProximityEvaluator {
    fn default() -> ProximityEvaluator {
        ProximityEvaluator {
            food_weight: 1.5,
            threat_radius: 3,
            threat_weight: 30.0,
        }
    }
}

impl Evaluator<GameState> for ProximityEvaluator {
    fn evaluate(&self, state: &GameState) -> f64 {
        let base = state.score() as f64;
        if state.is_over() {
            // Win/loss bonuses are already in the score.
            return base;
        }

        let dist = maze_distances(state.grid(), state.runner_pos());
        let mut value = base;

        let nearest_food = state
            .grid()
            .positions()
            .filter(|&p| state.has_food_at(p))
            .filter_map(|p| {
                let d = dist[state.grid().index(p)];
                (d >= 0).then_some(d)
            })
            .min();
        if let Some(d) = nearest_food {
            value -= self.food_weight * d as f64;
        }

        for chaser in &state.agents()[1..] {
            let d = dist[state.grid().index(chaser.pos)];
            if d >= 0 && d <= self.threat_radius {
                value -= self.threat_weight * (self.threat_radius + 1 - d) as f64;
            }
        }

        value
    }
}

/// BFS shortest-path distances from `from` to every cell, through open
/// cells only. Unreachable cells (and walls) get -1.
fn maze_distances(grid: &Grid, from: Pos) -> Vec<i32> {
    let mut dist = vec![-1i32; grid.len()];
    let mut queue = VecDeque::with_capacity(grid.len());

    dist[grid.index(from)] = 0;
    queue.push_back(from);

    while let Some(cur) = queue.pop_front() {
        let d = dist[grid.index(cur)];
        for dir in DIRECTIONS {
            let next = cur.step(dir);
            if grid.is_wall(next) {
                continue;
            }
            let idx = grid.index(next);
            if dist[idx] == -1 {
                dist[idx] = d + 1;
                queue.push_back(next);
            }
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Action, Status, RUNNER};
    use crate::movegen::successor;
    use crate::protocol::pfen::parse_pfen;

    #[test]
    fn score_evaluator_is_the_score() {
        let state = parse_pfen("#####|#R.C#|#####/37").unwrap();
        assert_eq!(ScoreEvaluator.evaluate(&state), 37.0);
    }

    #[test]
    fn distances_route_around_walls() {
        let state = parse_pfen("#####|#R#.#|#---#|#####/0").unwrap();
        let dist = maze_distances(state.grid(), state.runner_pos());
        // The pellet at (3,1) is 4 steps away around the wall, not 2.
        let grid = state.grid();
        assert_eq!(dist[grid.index(Pos::new(3, 1))], 4);
        assert_eq!(dist[grid.index(Pos::new(1, 2))], 1);
    }

    #[test]
    fn unreachable_cells_are_marked() {
        let state = parse_pfen("#####|#R#.#|#####/0").unwrap();
        let dist = maze_distances(state.grid(), state.runner_pos());
        assert_eq!(dist[state.grid().index(Pos::new(3, 1))], -1);
    }

    #[test]
    fn nearer_food_scores_higher() {
        let eval = ProximityEvaluator::default();
        let far = parse_pfen("######|#R--.#|######/0").unwrap();
        let near = parse_pfen("######|#R.--#|######/0").unwrap();
        assert!(eval.evaluate(&near) > eval.evaluate(&far));
    }

    #[test]
    fn adjacent_chaser_depresses_the_value() {
        let eval = ProximityEvaluator::default();
        let safe = parse_pfen("#######|#R.--C#|#######/0").unwrap();
        let exposed = parse_pfen("#######|#RC--.#|#######/0").unwrap();
        assert!(eval.evaluate(&safe) > eval.evaluate(&exposed));
    }

    #[test]
    fn terminal_states_fall_back_to_the_score() {
        let state = parse_pfen("####|#R.#|####/0").unwrap();
        let won = successor(&state, RUNNER, Action::East).unwrap();
        assert_eq!(won.status(), Status::Won);
        let eval = ProximityEvaluator::default();
        assert_eq!(eval.evaluate(&won), won.score() as f64);
    }

    #[test]
    fn walls_do_not_hide_threats_behind_them() {
        // Chaser on the far side of a wall is 6 maze cells away even
        // though it is 2 cells away in the straight line.
        let eval = ProximityEvaluator::default();
        let state = parse_pfen("#####|#R#C#|#---#|#.###|#####/0").unwrap();
        let around = parse_pfen("#####|#RC-#|#---#|#.###|#####/0").unwrap();
        assert!(eval.evaluate(&state) > eval.evaluate(&around));
    }
}
