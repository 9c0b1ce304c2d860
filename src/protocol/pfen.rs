//! PFEN (pursuit FEN) encoding and decoding.
//!
//! PFEN is a compact single-line notation for a full game position,
//! inspired by chess FEN. The maze is drawn row by row with `|` between
//! rows, followed by the score: `#####|#R.C#|#####/0`.
//!
//! Cell characters: `#` wall, `.` food, `R` runner, `C` chaser, `-`
//! empty. Chasers are numbered in reading order; headings parse as Stop,
//! so a freshly parsed chaser is free to move any open direction.
//! Encoding is canonical for ongoing states: an agent's cell shows the
//! agent, so food underneath a chaser and co-located agents do not
//! round-trip.

use std::sync::Arc;

use crate::board::{AgentState, GameState, Grid, Pos};

/// Errors that can occur during PFEN parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PfenError {
    #[error("expected 2 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("grid has no rows")]
    EmptyGrid,

    #[error("row {row} has width {got}, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("unknown cell character '{0}'")]
    UnknownCell(char),

    #[error("no runner on the grid")]
    MissingRunner,

    #[error("more than one runner on the grid")]
    DuplicateRunner,

    #[error("invalid score: '{0}'")]
    InvalidScore(String),
}

/// Parses a PFEN string into a game state.
///
/// The status is derived from the board: a grid without food parses as
/// already won.
pub fn parse_pfen(s: &str) -> Result<GameState, PfenError> {
    let sections: Vec<&str> = s.split('/').collect();
    if sections.len() != 2 {
        return Err(PfenError::WrongSectionCount(sections.len()));
    }

    let rows: Vec<&str> = sections[0].split('|').collect();
    if rows.is_empty() || rows[0].is_empty() {
        return Err(PfenError::EmptyGrid);
    }

    let width = rows[0].chars().count();
    let height = rows.len();

    let mut walls = Vec::with_capacity(width * height);
    let mut food = Vec::with_capacity(width * height);
    let mut runner: Option<Pos> = None;
    let mut chasers: Vec<Pos> = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        let cells: Vec<char> = row.chars().collect();
        if cells.len() != width {
            return Err(PfenError::RaggedRow {
                row: y,
                got: cells.len(),
                expected: width,
            });
        }
        for (x, c) in cells.iter().enumerate() {
            let pos = Pos::new(x as i16, y as i16);
            let (wall, has_food) = match c {
                '#' => (true, false),
                '.' => (false, true),
                '-' => (false, false),
                'R' => {
                    if runner.replace(pos).is_some() {
                        return Err(PfenError::DuplicateRunner);
                    }
                    (false, false)
                }
                'C' => {
                    chasers.push(pos);
                    (false, false)
                }
                other => return Err(PfenError::UnknownCell(*other)),
            };
            walls.push(wall);
            food.push(has_food);
        }
    }

    let runner = runner.ok_or(PfenError::MissingRunner)?;
    let score: i32 = sections[1]
        .parse()
        .map_err(|_| PfenError::InvalidScore(sections[1].to_string()))?;

    let mut agents = Vec::with_capacity(1 + chasers.len());
    agents.push(AgentState::at(runner));
    agents.extend(chasers.into_iter().map(AgentState::at));

    let grid = Arc::new(Grid::new(width as i16, height as i16, walls));
    let mut state = GameState::new(grid, food, agents);
    state.add_score(score);
    Ok(state)
}

/// Encodes a game state as a PFEN string.
pub fn encode_pfen(state: &GameState) -> String {
    let grid = state.grid();
    let mut out = String::with_capacity(grid.len() + grid.height() as usize + 8);

    for y in 0..grid.height() {
        if y > 0 {
            out.push('|');
        }
        for x in 0..grid.width() {
            let pos = Pos::new(x, y);
            let c = if grid.is_wall(pos) {
                '#'
            } else if state.runner_pos() == pos {
                'R'
            } else if state.agents()[1..].iter().any(|a| a.pos == pos) {
                'C'
            } else if state.has_food_at(pos) {
                '.'
            } else {
                '-'
            };
            out.push(c);
        }
    }

    out.push('/');
    out.push_str(&state.score().to_string());
    out
}
