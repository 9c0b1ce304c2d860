//! Scripted tree positions for exercising the search without game rules.
//!
//! A `Scripted` position is just the path of move indices taken from the
//! root of a uniform tree. Tests pick leaf values with a closure over the
//! path, mark paths as terminal, or mark them as contract-violating
//! (non-terminal with no moves).

use std::collections::HashSet;
use std::rc::Rc;

use super::position::{AgentIndex, Position, SearchError};

/// Shape shared by every position in one scripted tree.
#[derive(Debug)]
pub(crate) struct ScriptedTree {
    agents: usize,
    branch: usize,
    terminal: HashSet<Vec<usize>>,
    stuck: HashSet<Vec<usize>>,
}

impl ScriptedTree {
    /// A uniform tree: `agents` agents, `branch` moves everywhere.
    pub(crate) fn new(agents: usize, branch: usize) -> ScriptedTree {
        ScriptedTree {
            agents,
            branch,
            terminal: HashSet::new(),
            stuck: HashSet::new(),
        }
    }

    /// Marks the position at `path` as terminal.
    pub(crate) fn terminal_at(mut self, path: &[usize]) -> ScriptedTree {
        self.terminal.insert(path.to_vec());
        self
    }

    /// Marks the position at `path` as offering no moves while claiming
    /// not to be terminal -- a rules-engine contract violation.
    pub(crate) fn stuck_at(mut self, path: &[usize]) -> ScriptedTree {
        self.stuck.insert(path.to_vec());
        self
    }

    /// The root position of this tree.
    pub(crate) fn root(self) -> Scripted {
        Scripted {
            path: Vec::new(),
            tree: Rc::new(self),
        }
    }
}

/// A position in a scripted tree, identified by its path from the root.
#[derive(Clone, Debug)]
pub(crate) struct Scripted {
    pub(crate) path: Vec<usize>,
    tree: Rc<ScriptedTree>,
}

impl Position for Scripted {
    type Move = usize;

    fn num_agents(&self) -> usize {
        self.tree.agents
    }

    fn legal_moves(&self, _agent: AgentIndex) -> Vec<usize> {
        if self.is_terminal() || self.tree.stuck.contains(&self.path) {
            return Vec::new();
        }
        (0..self.tree.branch).collect()
    }

    fn successor(&self, agent: AgentIndex, mv: &usize) -> Result<Scripted, SearchError> {
        if !self.legal_moves(agent).contains(mv) {
            return Err(SearchError::InvalidMove { agent });
        }
        let mut path = self.path.clone();
        path.push(*mv);
        Ok(Scripted {
            path,
            tree: Rc::clone(&self.tree),
        })
    }

    fn is_terminal(&self) -> bool {
        self.tree.terminal.contains(&self.path)
    }
}
