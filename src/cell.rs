use std::{cmp::Ordering, ops::Sub};

/// Offsets of the 8 surrounding cells, row by row from the top-left
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A coordinate on the unbounded grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    #[inline]
    pub fn translate(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// The 8 coordinates surrounding this cell
    ///
    /// Ordered by row (`dy = -1, 0, 1`), then by column within the row.
    /// Coordinates wrap at the `i64` bounds, so a cell at `i64::MAX` sees
    /// `i64::MIN` as its right-hand neighbor.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| self.translate(dx, dy))
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl From<(i64, i64)> for Cell {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl PartialOrd for Cell {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Cell {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: y first, x breaks ties
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

/// Wraps at the `i64` bounds, like [`Cell::translate`]
impl Sub for Cell {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.wrapping_sub(rhs.x),
            y: self.y.wrapping_sub(rhs.y),
        }
    }
}
