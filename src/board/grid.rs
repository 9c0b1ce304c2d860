//! The maze layout.
//!
//! A `Grid` is the immutable part of a game position: rectangular
//! dimensions and wall cells. It is shared between all states derived from
//! one root position, so successor generation never copies it.

use super::action::Action;

/// A cell coordinate. Rows are indexed from the top of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i16,
    pub y: i16,
}

impl Pos {
    pub const fn new(x: i16, y: i16) -> Pos {
        Pos { x, y }
    }

    /// Returns the cell reached by taking `action` from this cell.
    pub const fn step(self, action: Action) -> Pos {
        let (dx, dy) = action.offset();
        Pos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to another cell.
    pub const fn manhattan(self, other: Pos) -> i16 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// The wall layout of a maze.
///
/// Cells outside the rectangle count as walls, so callers never need a
/// separate bounds check before probing a neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i16,
    height: i16,
    walls: Vec<bool>,
}

impl Grid {
    /// Builds a grid from row-major wall flags.
    ///
    /// `walls.len()` must equal `width * height`.
    pub fn new(width: i16, height: i16, walls: Vec<bool>) -> Grid {
        assert_eq!(walls.len(), (width as usize) * (height as usize));
        Grid {
            width,
            height,
            walls,
        }
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    /// Row-major cell index for a position known to be in bounds.
    #[inline]
    pub fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Returns true if the cell is a wall or out of bounds.
    #[inline]
    pub fn is_wall(&self, pos: Pos) -> bool {
        !self.in_bounds(pos) || self.walls[self.index(pos)]
    }

    /// Iterates all in-bounds positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Pos::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_by_two() -> Grid {
        // ###
        // #-#  with the middle of the bottom row open
        Grid::new(3, 2, vec![true, true, true, true, false, true])
    }

    #[test]
    fn wall_lookup() {
        let g = three_by_two();
        assert!(g.is_wall(Pos::new(0, 0)));
        assert!(!g.is_wall(Pos::new(1, 1)));
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let g = three_by_two();
        assert!(g.is_wall(Pos::new(-1, 0)));
        assert!(g.is_wall(Pos::new(3, 0)));
        assert!(g.is_wall(Pos::new(0, 2)));
    }

    #[test]
    fn step_moves_one_cell() {
        let p = Pos::new(1, 1);
        assert_eq!(p.step(Action::North), Pos::new(1, 0));
        assert_eq!(p.step(Action::South), Pos::new(1, 2));
        assert_eq!(p.step(Action::East), Pos::new(2, 1));
        assert_eq!(p.step(Action::West), Pos::new(0, 1));
        assert_eq!(p.step(Action::Stop), p);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Pos::new(0, 0).manhattan(Pos::new(3, 4)), 7);
        assert_eq!(Pos::new(2, 2).manhattan(Pos::new(2, 2)), 0);
    }

    #[test]
    fn positions_cover_grid() {
        let g = three_by_two();
        assert_eq!(g.positions().count(), 6);
    }
}
