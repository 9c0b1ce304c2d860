//! Agent actions.
//!
//! An action is one step in a compass direction, or standing still.
//! Direction enumeration order is fixed and load-bearing: the decision
//! driver breaks ties by taking the first maximal action in this order.

/// A single agent action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    North,
    South,
    East,
    West,
    Stop,
}

/// The four movement directions, in canonical enumeration order.
pub const DIRECTIONS: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

impl Action {
    /// Returns the `(dx, dy)` cell offset for this action.
    ///
    /// Rows are indexed from the top of the map, so North decreases `y`.
    pub const fn offset(self) -> (i16, i16) {
        match self {
            Action::North => (0, -1),
            Action::South => (0, 1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
            Action::Stop => (0, 0),
        }
    }

    /// Returns the opposite direction. Stop is its own reverse.
    pub const fn reverse(self) -> Action {
        match self {
            Action::North => Action::South,
            Action::South => Action::North,
            Action::East => Action::West,
            Action::West => Action::East,
            Action::Stop => Action::Stop,
        }
    }

    /// Returns the lowercase protocol name of this action.
    pub const fn name(self) -> &'static str {
        match self {
            Action::North => "north",
            Action::South => "south",
            Action::East => "east",
            Action::West => "west",
            Action::Stop => "stop",
        }
    }

    /// Parses an action from its lowercase protocol name.
    pub fn from_name(s: &str) -> Option<Action> {
        match s {
            "north" => Some(Action::North),
            "south" => Some(Action::South),
            "east" => Some(Action::East),
            "west" => Some(Action::West),
            "stop" => Some(Action::Stop),
            _ => None,
        }
    }
}
