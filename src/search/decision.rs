//! Top-level decision driver.
//!
//! Wraps the node evaluator: iterates the controlled agent's legal moves
//! at the root, values each successor as the first adversary's turn, and
//! commits to one action. The default tie-break is deterministic -- the
//! first move reaching the maximum wins, and later equal scores never
//! displace it. A uniform-random-among-ties variant is a separate entry
//! point, never a silent substitution.

use rand::Rng;

use crate::eval::Evaluator;

use super::minimax::{Bound, NodeEvaluator, SearchMode, SearchStats};
use super::position::{next_turn, Position, SearchError};

/// The committed action, its root value, and the search's counters.
#[derive(Debug, Clone)]
pub struct Decision<M> {
    pub action: M,
    pub value: f64,
    pub stats: SearchStats,
}

/// Picks the controlled agent's action by depth-bounded search.
///
/// Ties go to the first maximal move in the engine's enumeration order,
/// every time. Fails with [`SearchError::NoLegalMove`] if the controlled
/// agent cannot move; callers must check terminality before deciding.
pub fn decide<P, E>(
    pos: &P,
    eval: &E,
    max_depth: u32,
    mode: SearchMode,
) -> Result<Decision<P::Move>, SearchError>
where
    P: Position,
    E: Evaluator<P>,
{
    let (moves, values, stats) = scan_root(pos, eval, max_depth, mode)?;
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    Ok(Decision {
        action: moves[best].clone(),
        value: values[best],
        stats,
    })
}

/// Like [`decide`], but picks uniformly at random among tied maxima.
///
/// Intended for `Exact` and `Expected` searches: under `Pruned`, root
/// alpha carrying can undervalue later tied moves, hiding ties.
pub fn decide_uniform<P, E, R>(
    pos: &P,
    eval: &E,
    max_depth: u32,
    mode: SearchMode,
    rng: &mut R,
) -> Result<Decision<P::Move>, SearchError>
where
    P: Position,
    E: Evaluator<P>,
    R: Rng,
{
    let (moves, values, stats) = scan_root(pos, eval, max_depth, mode)?;
    let best = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<usize> = (0..moves.len()).filter(|&i| values[i] == best).collect();
    let pick = tied[rng.gen_range(0..tied.len())];
    Ok(Decision {
        action: moves[pick].clone(),
        value: values[pick],
        stats,
    })
}

/// Values every root move in enumeration order.
///
/// Under `Pruned`, alpha carries across sibling root moves -- each search
/// is bounded below by the best earlier root value, which is sound
/// because the root itself maximizes -- while beta is reset to infinity
/// for each root move's sub-search.
fn scan_root<P, E>(
    pos: &P,
    eval: &E,
    max_depth: u32,
    mode: SearchMode,
) -> Result<(Vec<P::Move>, Vec<f64>, SearchStats), SearchError>
where
    P: Position,
    E: Evaluator<P>,
{
    let moves = pos.legal_moves(0);
    if moves.is_empty() {
        return Err(SearchError::NoLegalMove);
    }

    let (next, next_rounds) = next_turn(0, pos.num_agents(), 0);
    let mut search = NodeEvaluator::new(eval, mode, max_depth);
    let mut values = Vec::with_capacity(moves.len());
    let mut best = f64::NEG_INFINITY;

    for mv in &moves {
        let succ = pos.successor(0, mv)?;
        let bound = (mode == SearchMode::Pruned).then(|| Bound::root_with_alpha(best));
        let v = search.value(&succ, next, next_rounds, bound)?;
        if v > best {
            best = v;
        }
        values.push(v);
    }

    Ok((moves, values, search.stats))
}
